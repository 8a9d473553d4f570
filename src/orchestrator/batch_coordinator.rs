//! 批次协调器 - 编排层
//!
//! ## 职责
//!
//! 1. **并发分发**：每个图表一个 tokio 任务，用 Semaphore 限制同时运行的浏览器数量
//! 2. **结果通知**：每个任务结束时立即通知成功或失败，失败不影响其他任务
//! 3. **资源清理**：所有任务结束后（join-all 屏障）删除临时目录
//!
//! 临时目录只在分发阶段写入，屏障之后删除，因此不需要加锁

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::error::{AppError, RenderError};
use crate::infrastructure::TemporaryWorkspace;
use crate::services::{Notification, Notifier};
use crate::utils::logging::{log_batch_complete, log_batch_start};
use crate::workflow::{JobDispatcher, JobOutcome, RenderJob};

/// 批次统计（只用于日志）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// 每个失败任务一行：`[图表 #N] 错误信息`
    pub failures: Vec<String>,
}

/// 批次协调器
pub struct BatchCoordinator {
    dispatcher: JobDispatcher,
    notifier: Arc<dyn Notifier>,
    max_concurrent_jobs: usize,
}

impl BatchCoordinator {
    pub fn new(
        dispatcher: JobDispatcher,
        notifier: Arc<dyn Notifier>,
        max_concurrent_jobs: usize,
    ) -> Self {
        Self {
            dispatcher,
            notifier,
            max_concurrent_jobs: max_concurrent_jobs.max(1),
        }
    }

    /// 运行一个批次
    ///
    /// 返回时所有任务都已结束，临时目录已删除
    pub async fn run_batch(
        &self,
        jobs: Vec<RenderJob>,
        workspace: TemporaryWorkspace,
    ) -> BatchSummary {
        let total = jobs.len();

        if jobs.is_empty() {
            info!("没有需要渲染的图表");
            workspace.close();
            return BatchSummary::default();
        }

        log_batch_start(total, self.max_concurrent_jobs);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_jobs));
        let mut labels = Vec::with_capacity(total);
        let mut handles = Vec::with_capacity(total);

        // 为每个图表创建并发任务（输入文件在这里同步写入）
        for job in &jobs {
            let pending = self.dispatcher.dispatch(job);
            let semaphore = Arc::clone(&semaphore);
            let notifier = Arc::clone(&self.notifier);
            let output = job.paths.output_path.clone();
            let label = job.to_string();

            labels.push(label.clone());
            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                match pending.await {
                    Ok(()) => {
                        notifier.notify(Notification::generated(&output));
                        JobOutcome::Succeeded
                    }
                    Err(e) => {
                        error!("{} ❌ 渲染失败: {}", label, e);
                        let message = e.detail();
                        notifier.notify(Notification::Error(message.clone()));
                        JobOutcome::Failed(message)
                    }
                }
            }));
        }

        // 等待所有任务结束
        let settled = join_all(handles).await;

        let mut summary = BatchSummary {
            total,
            ..Default::default()
        };
        for (label, result) in labels.iter().zip(settled) {
            match result {
                Ok(JobOutcome::Succeeded) => summary.succeeded += 1,
                Ok(JobOutcome::Failed(message)) => {
                    summary.failed += 1;
                    summary.failures.push(format!("{} {}", label, message));
                }
                Err(e) => {
                    let err = AppError::from(RenderError::TaskAborted {
                        message: format!("{} {}", label, e),
                    });
                    error!("{} ❌ {}", label, err);
                    let message = err.detail();
                    self.notifier.notify(Notification::Error(message.clone()));
                    summary.failed += 1;
                    summary.failures.push(message);
                }
            }
        }

        log_batch_complete(summary.succeeded, summary.total);

        // 屏障之后才能删除临时目录
        workspace.close();

        summary
    }
}
