use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::browser::MermaidRenderer;
use crate::config::Config;
use crate::models::{Document, RenderOptions};
use crate::orchestrator::{process_document, BatchCoordinator, BatchSummary};
use crate::services::{LogFileNotifier, Notifier, Renderer};
use crate::utils::logging::{init_log_file, log_failures, log_startup, print_final_stats};
use crate::workflow::JobDispatcher;

/// 应用主结构
pub struct App {
    config: Config,
    coordinator: BatchCoordinator,
}

impl App {
    /// 初始化应用：日志文件 + 真实浏览器渲染器
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let notifier = Arc::new(LogFileNotifier::new(&config.output_log_file));
        Ok(Self::with_collaborators(
            config,
            Arc::new(MermaidRenderer::new()),
            notifier,
        ))
    }

    /// 使用指定的渲染器和通知接收方
    pub fn with_collaborators(
        config: Config,
        renderer: Arc<dyn Renderer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let dispatcher = JobDispatcher::new(renderer, RenderOptions::from_config(&config));
        let coordinator = BatchCoordinator::new(dispatcher, notifier, config.max_concurrent_jobs);

        Self {
            config,
            coordinator,
        }
    }

    /// 渲染一个文档中的所有图表
    pub async fn run(&self, document_path: &Path) -> Result<BatchSummary> {
        info!("\n📁 正在读取文档: {}", document_path.display());

        let document = Document::load(document_path)
            .await
            .with_context(|| format!("无法读取文档: {}", document_path.display()))?;

        let summary = process_document(&document, &self.coordinator)
            .await
            .context("无法创建临时目录")?;

        if summary.total == 0 {
            warn!("⚠️ 文档中没有找到 mermaid 图表");
        }

        log_failures(&summary.failures);

        print_final_stats(
            summary.succeeded,
            summary.failed,
            summary.total,
            &self.config.output_log_file,
        );

        Ok(summary)
    }
}
