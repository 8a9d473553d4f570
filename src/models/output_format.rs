use std::path::Path;

use crate::error::{AppResult, RenderError};

/// 输出格式，完全由输出路径的扩展名决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    /// 根据扩展名（不区分大小写）判断输出格式
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("svg") => Ok(Self::Svg),
            Some("png") => Ok(Self::Png),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(RenderError::UnsupportedOutputFormat {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }
}
