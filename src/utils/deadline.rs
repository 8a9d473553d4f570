//! 渲染时限
//!
//! 超时后返回 `RenderError::Timeout`，调用方在 await 返回之后仍可以继续执行清理

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::error::{AppResult, RenderError};

/// 在 `limit` 内完成 `work`；`None` 表示不限制
pub async fn with_deadline<T>(
    limit: Option<Duration>,
    output: &Path,
    work: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    let Some(limit) = limit else {
        return work.await;
    };

    match tokio::time::timeout(limit, work).await {
        Ok(result) => result,
        Err(_) => Err(RenderError::Timeout {
            output: output.to_path_buf(),
            secs: limit.as_secs(),
        }
        .into()),
    }
}
