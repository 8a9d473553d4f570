//! 渲染任务
//!
//! 封装"我正在渲染文档中的第几个图表、读写哪些文件"这一信息

use std::fmt::Display;

use crate::models::{Block, ResolvedPaths};

/// 一个图表的渲染任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// 扫描得到的代码块
    pub block: Block,
    /// 输入/输出路径
    pub paths: ResolvedPaths,
}

impl RenderJob {
    pub fn new(block: Block, paths: ResolvedPaths) -> Self {
        Self { block, paths }
    }
}

impl Display for RenderJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[图表 #{}]", self.block.index)
    }
}

/// 任务结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// 渲染成功
    Succeeded,
    /// 渲染失败，附带错误信息
    Failed(String),
}
