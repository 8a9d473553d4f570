use std::path::PathBuf;

use anyhow::{Context, Result};
use render_mermaid::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    let document_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("用法: render_mermaid <document.md>")?;

    // 初始化并运行应用
    App::initialize(config)?.run(&document_path).await?;

    Ok(())
}
