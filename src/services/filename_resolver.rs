//! 文件名解析服务 - 业务能力层
//!
//! 根据文档、图表序号和扫描结果确定输入/输出路径

use std::path::PathBuf;

use crate::models::{Block, Document, ResolvedPaths};

/// 文件名解析器
///
/// - 输出：指定了文件名时相对文档目录（绝对路径原样使用），
///   否则为 `{文档名}_mrmd_{序号}.png`
/// - 输入：总是 `{临时目录}/{文档名}_input_{序号}.md`
/// - 不检测重名，后写入的覆盖先写入的
#[derive(Debug, Clone)]
pub struct FilenameResolver {
    document_dir: PathBuf,
    base_name: String,
    temp_dir: PathBuf,
}

impl FilenameResolver {
    pub fn new(document: &Document, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            document_dir: document.directory(),
            base_name: document.base_name(),
            temp_dir: temp_dir.into(),
        }
    }

    pub fn resolve(&self, block: &Block) -> ResolvedPaths {
        ResolvedPaths {
            input_path: self.input_path(block.index),
            output_path: self.output_path(block),
        }
    }

    fn output_path(&self, block: &Block) -> PathBuf {
        match &block.requested_output {
            Some(name) => self.document_dir.join(name),
            None => self
                .document_dir
                .join(format!("{}_mrmd_{}.png", self.base_name, block.index)),
        }
    }

    fn input_path(&self, index: usize) -> PathBuf {
        self.temp_dir
            .join(format!("{}_input_{}.md", self.base_name, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(index: usize, requested_output: Option<&str>) -> Block {
        Block {
            index,
            start_line: 0,
            end_line: 2,
            body: "A-->B".to_string(),
            requested_output: requested_output.map(str::to_string),
        }
    }

    fn resolver() -> FilenameResolver {
        let doc = Document::from_lines("/work/docs/design.md", Vec::<String>::new());
        FilenameResolver::new(&doc, "/tmp/scratch")
    }

    #[test]
    fn test_default_output_name() {
        let paths = resolver().resolve(&block(3, None));
        assert_eq!(paths.output_path, PathBuf::from("/work/docs/design_mrmd_3.png"));
        assert_eq!(paths.input_path, PathBuf::from("/tmp/scratch/design_input_3.md"));
    }

    #[test]
    fn test_requested_output_ignores_index() {
        let resolver = resolver();
        for index in [1, 7, 42] {
            let paths = resolver.resolve(&block(index, Some("foo.svg")));
            assert_eq!(paths.output_path, PathBuf::from("/work/docs/foo.svg"));
            assert_eq!(
                paths.input_path,
                PathBuf::from(format!("/tmp/scratch/design_input_{}.md", index))
            );
        }
    }

    #[test]
    fn test_requested_relative_and_absolute_paths() {
        let resolver = resolver();
        assert_eq!(
            resolver.resolve(&block(1, Some("img/flow.pdf"))).output_path,
            PathBuf::from("/work/docs/img/flow.pdf")
        );
        assert_eq!(
            resolver.resolve(&block(1, Some("/srv/out/flow.png"))).output_path,
            PathBuf::from("/srv/out/flow.png")
        );
    }

    #[test]
    fn test_same_requested_name_collides() {
        let resolver = resolver();
        let first = resolver.resolve(&block(1, Some("same.png")));
        let second = resolver.resolve(&block(2, Some("same.png")));
        assert_eq!(first.output_path, second.output_path);
        assert_ne!(first.input_path, second.input_path);
    }
}
