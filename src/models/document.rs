//! 文档模型
//!
//! 文档 = 路径 + 按顺序排列的文本行，扫描期间不可变

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{AppError, AppResult};

/// 待扫描的文档
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
}

impl Document {
    /// 从内存中的行创建文档
    pub fn from_lines<I, S>(path: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// 从磁盘读取文档
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::file_not_found(path));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path, e))?;

        Ok(Self::from_lines(path, content.lines()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 不带扩展名的文件名，例如 `notes.md` → `notes`
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// 文档所在目录；相对路径没有父目录时返回 `.`
    pub fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
