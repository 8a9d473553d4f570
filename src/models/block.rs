use std::path::PathBuf;

/// 文档中找到的一个 mermaid 代码块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// 图表序号（从 1 开始，按发现顺序递增）
    pub index: usize,
    /// 开始围栏所在行（从 0 开始）
    pub start_line: usize,
    /// 结束围栏所在行（从 0 开始）
    pub end_line: usize,
    /// 围栏内部的文本，用平台换行符连接
    pub body: String,
    /// 开始围栏上指定的输出文件名
    pub requested_output: Option<String>,
}

/// 一个图表的输入/输出路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// 临时输入文件（位于临时目录中）
    pub input_path: PathBuf,
    /// 最终输出文件（位于文档所在目录中）
    pub output_path: PathBuf,
}
