//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **创建临时目录**：每次扫描一次，即使文档中没有图表
//! 2. **扫描**：找出所有 mermaid 代码块
//! 3. **解析路径**：为每个代码块确定输入/输出文件
//! 4. **委托**：交给批次协调器并发渲染

use std::path::Path;

use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::TemporaryWorkspace;
use crate::models::Document;
use crate::orchestrator::batch_coordinator::{BatchCoordinator, BatchSummary};
use crate::services::{BlockScanner, FilenameResolver};
use crate::utils::logging::log_blocks_found;
use crate::workflow::RenderJob;

/// 处理一个文档（临时目录建在系统临时目录下）
pub async fn process_document(
    document: &Document,
    coordinator: &BatchCoordinator,
) -> AppResult<BatchSummary> {
    let workspace = TemporaryWorkspace::create()?;
    Ok(process_document_in(document, coordinator, workspace).await)
}

/// 使用给定的临时目录处理一个文档，返回时临时目录已删除
pub async fn process_document_in(
    document: &Document,
    coordinator: &BatchCoordinator,
    workspace: TemporaryWorkspace,
) -> BatchSummary {
    let jobs = collect_jobs(document, workspace.path());
    log_blocks_found(document.path(), jobs.len());
    coordinator.run_batch(jobs, workspace).await
}

/// 扫描文档并为每个代码块解析路径
pub fn collect_jobs(document: &Document, temp_dir: &Path) -> Vec<RenderJob> {
    let resolver = FilenameResolver::new(document, temp_dir);

    BlockScanner::for_document(document)
        .map(|block| {
            let paths = resolver.resolve(&block);
            debug!(
                "[图表 #{}] 输出: {}",
                block.index,
                paths.output_path.display()
            );
            RenderJob::new(block, paths)
        })
        .collect()
}
