//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `document_processor` - 单个文档处理器
//! - 创建临时目录
//! - 扫描代码块（BlockScanner）
//! - 解析输入/输出路径（FilenameResolver）
//!
//! ### `batch_coordinator` - 批次协调器
//! - 每个图表一个并发任务（Semaphore 限流）
//! - 逐个通知成功/失败
//! - 全部结束后删除临时目录
//!
//! ## 层次关系
//!
//! ```text
//! document_processor (处理 Document)
//!     ↓
//! batch_coordinator (处理 Vec<RenderJob>)
//!     ↓
//! workflow::JobDispatcher (处理单个 RenderJob)
//!     ↓
//! services::Renderer (能力层：渲染)
//!     ↓
//! browser / infrastructure (无头浏览器、JsExecutor、临时目录)
//! ```

pub mod batch_coordinator;
pub mod document_processor;

pub use batch_coordinator::{BatchCoordinator, BatchSummary};
pub use document_processor::{collect_jobs, process_document, process_document_in};
