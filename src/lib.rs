//! # Render Mermaid
//!
//! 从 Markdown 文档中提取 mermaid 代码块，用无头浏览器渲染成 SVG / PNG / PDF，
//! 输出到文档所在目录
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `JsExecutor` - 页面的持有者，提供 eval() 能力
//! - `TemporaryWorkspace` - 每次扫描一个的临时目录
//! - `browser/` - 启动无头浏览器、mermaid 渲染器
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `BlockScanner` - 扫描 mermaid 代码块
//! - `FilenameResolver` - 确定输入/输出路径
//! - `Renderer` - 渲染能力（trait，测试时可替换）
//! - `Notifier` - 通知能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个图表"的完整处理流程
//! - `RenderJob` - 代码块 + 路径
//! - `JobDispatcher` - 写输入 → 渲染 → 删除输入
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/document_processor` - 扫描文档、解析路径
//! - `orchestrator/batch_coordinator` - 并发渲染、通知、清理临时目录
//!
//! ## 模块结构

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use browser::MermaidRenderer;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::TemporaryWorkspace;
pub use models::{Block, Document, OutputFormat, RenderOptions, ResolvedPaths};
pub use orchestrator::{process_document, BatchCoordinator, BatchSummary};
pub use services::{BlockScanner, FilenameResolver, Notification, Notifier, Renderer};
pub use workflow::{JobDispatcher, RenderJob};
