/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nmermaid 渲染日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法初始化日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - mermaid 图表批量渲染");
    info!("📊 最大并发数: {}", config.max_concurrent_jobs);
    info!(
        "🎨 主题: {} | 尺寸: {}x{} | 背景: {}",
        config.theme, config.width, config.height, config.background_color
    );
    info!("{}", "=".repeat(60));
}

/// 记录文档扫描结果
///
/// # 参数
/// - `document_path`: 文档路径
/// - `total`: 找到的图表数量
pub fn log_blocks_found(document_path: &Path, total: usize) {
    info!("📄 文档: {}", document_path.display());
    info!("✓ 找到 {} 个 mermaid 图表", total);
}

/// 记录批次开始信息
///
/// # 参数
/// - `total`: 任务总数
/// - `max_concurrent`: 最大并发数
pub fn log_batch_start(total: usize, max_concurrent: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始渲染 {} 个图表 (并发上限 {})", total, max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `success`: 成功数量
/// - `total`: 任务总数
pub fn log_batch_complete(success: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 批次完成: 成功 {}/{}", success, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 逐条列出失败的图表
pub fn log_failures(failures: &[String]) {
    if failures.is_empty() {
        return;
    }
    warn!("⚠️ 以下 {} 个图表渲染失败:", failures.len());
    for failure in failures {
        warn!("  - {}", failure);
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
