//! 临时工作目录 - 基础设施层
//!
//! 每次扫描创建一次，存放所有临时输入文件和浏览器配置目录

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{AppResult, FileError};

/// 临时工作目录
///
/// 只能由批次协调器在所有任务结束后调用 [`close`](Self::close) 删除。
/// 若提前被 drop，`TempDir` 同样会尽力删除目录
#[derive(Debug)]
pub struct TemporaryWorkspace {
    dir: TempDir,
}

impl TemporaryWorkspace {
    /// 在系统临时目录下创建
    pub fn create() -> AppResult<Self> {
        let dir = tempfile::Builder::new()
            .prefix("render_mermaid_")
            .tempdir()
            .map_err(|e| FileError::WorkspaceFailed {
                source: Box::new(e),
            })?;
        debug!("📁 创建临时目录: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// 删除目录及其中剩余的内容（尽力而为），返回被删除的路径
    pub fn close(self) -> PathBuf {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!("🗑️ 临时目录已删除: {}", path.display()),
            Err(e) => warn!("⚠️ 删除临时目录失败 ({}): {}", path.display(), e),
        }
        path
    }
}
