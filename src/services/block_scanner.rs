//! 代码块扫描服务 - 业务能力层
//!
//! 单次顺序扫描文档的行，找出 mermaid 围栏代码块

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::models::{Block, Document};

/// 平台换行符
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// 开始围栏：```mermaid [文件名.svg|png|pdf]
fn start_pattern() -> &'static Regex {
    static START: OnceLock<Regex> = OnceLock::new();
    START.get_or_init(|| {
        Regex::new(r"(?i)^```mermaid(?:\s+(.+\.(?:svg|png|pdf)))?\s*$")
            .expect("start fence pattern is valid")
    })
}

/// 结束围栏：单独的 ```
fn end_pattern() -> &'static Regex {
    static END: OnceLock<Regex> = OnceLock::new();
    END.get_or_init(|| Regex::new(r"^```\s*$").expect("end fence pattern is valid"))
}

/// 尚未闭合的代码块
#[derive(Debug)]
struct OpenBlock {
    index: usize,
    start_line: usize,
    requested_output: Option<String>,
    lines: Vec<String>,
}

impl OpenBlock {
    fn finish(self, end_line: usize) -> Block {
        Block {
            index: self.index,
            start_line: self.start_line,
            end_line,
            body: self.lines.join(LINE_ENDING),
            requested_output: self.requested_output,
        }
    }
}

/// 代码块扫描器
///
/// 惰性迭代器，消耗输入的行，只能向前扫描一次。
/// - 只有遇到结束围栏时才产出代码块
/// - 在代码块内部再次遇到开始围栏时，丢弃之前的内容重新开始（不支持嵌套）
/// - 文档结束时仍未闭合的代码块不会产出
/// - 序号在每次遇到开始围栏时递增（包括重新开始的情况）
pub struct BlockScanner<I> {
    lines: std::iter::Enumerate<I>,
    current: Option<OpenBlock>,
    counter: usize,
}

impl<I, S> BlockScanner<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I, Item = S>) -> Self {
        Self {
            lines: lines.into_iter().enumerate(),
            current: None,
            counter: 0,
        }
    }
}

impl<'a> BlockScanner<std::slice::Iter<'a, String>> {
    /// 扫描文档快照
    pub fn for_document(document: &'a Document) -> Self {
        Self::new(document.lines().iter())
    }
}

impl<I, S> Iterator for BlockScanner<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        for (line_no, line) in self.lines.by_ref() {
            let line = line.as_ref();

            if self.current.is_some() && end_pattern().is_match(line) {
                if let Some(open) = self.current.take() {
                    let block = open.finish(line_no);
                    debug!(
                        "[图表 #{}] 找到代码块: 第 {}-{} 行",
                        block.index,
                        block.start_line + 1,
                        block.end_line + 1
                    );
                    return Some(block);
                }
            }

            if let Some(caps) = start_pattern().captures(line) {
                self.counter += 1;
                if let Some(previous) = self.current.take() {
                    warn!(
                        "[图表 #{}] 第 {} 行的代码块未闭合，被第 {} 行的新代码块覆盖",
                        previous.index,
                        previous.start_line + 1,
                        line_no + 1
                    );
                }
                self.current = Some(OpenBlock {
                    index: self.counter,
                    start_line: line_no,
                    requested_output: caps.get(1).map(|m| m.as_str().to_string()),
                    lines: Vec::new(),
                });
                continue;
            }

            if let Some(open) = self.current.as_mut() {
                open.lines.push(line.to_string());
            }
        }

        if let Some(open) = self.current.take() {
            warn!(
                "[图表 #{}] 第 {} 行的代码块直到文档结束都没有闭合，已忽略",
                open.index,
                open.start_line + 1
            );
        }
        None
    }
}
