//! 任务分发 - 流程层
//!
//! 定义"一个图表"的完整处理流程：
//! 1. 检查输出扩展名（不支持时直接失败，不写文件也不调用渲染器）
//! 2. 同步写入临时输入文件
//! 3. 调用渲染器（渲染器自己遵守时限，这里只留一个更宽的兜底时限）
//! 4. 无论成功失败都删除临时输入文件

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::{OutputFormat, RenderOptions};
use crate::services::Renderer;
use crate::utils::{truncate_text, with_deadline};
use crate::workflow::render_job::RenderJob;

/// 渲染器超时后关闭浏览器所需的额外时间
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// 任务分发器
///
/// - 不持有浏览器资源
/// - 只依赖 `Renderer` 能力
/// - 可以被多个任务共享（内部都是 Arc）
#[derive(Clone)]
pub struct JobDispatcher {
    renderer: Arc<dyn Renderer>,
    options: Arc<RenderOptions>,
}

impl JobDispatcher {
    pub fn new(renderer: Arc<dyn Renderer>, options: RenderOptions) -> Self {
        Self {
            renderer,
            options: Arc::new(options),
        }
    }

    /// 分发一个任务
    ///
    /// 扩展名检查和输入文件写入在返回之前同步完成；
    /// 返回的 future 负责渲染和清理，结束时输入文件一定已被删除
    pub fn dispatch(&self, job: &RenderJob) -> BoxFuture<'static, AppResult<()>> {
        if let Err(e) = self.write_input(job) {
            return future::ready(Err(e)).boxed();
        }

        let renderer = Arc::clone(&self.renderer);
        let options = Arc::clone(&self.options);
        let guard = options.render_timeout.map(|limit| limit + SHUTDOWN_GRACE);
        let label = job.to_string();
        let input = job.paths.input_path.clone();
        let output = job.paths.output_path.clone();

        async move {
            let result =
                with_deadline(guard, &output, renderer.render(&input, &output, &options)).await;

            remove_input(&input, &label);
            result
        }
        .boxed()
    }

    fn write_input(&self, job: &RenderJob) -> AppResult<()> {
        OutputFormat::from_path(&job.paths.output_path)?;

        debug!(
            "{} 写入输入文件 {}: {}",
            job,
            job.paths.input_path.display(),
            truncate_text(&job.block.body, 40)
        );
        std::fs::write(&job.paths.input_path, &job.block.body)
            .map_err(|e| AppError::file_write_failed(&job.paths.input_path, e))
    }
}

/// 删除临时输入文件（尽力而为）
fn remove_input(input: &Path, label: &str) {
    match std::fs::remove_file(input) {
        Ok(()) => debug!("{} 🗑️ 已删除输入文件", label),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("{} ⚠️ 删除输入文件失败 ({}): {}", label, input.display(), e),
    }
}
