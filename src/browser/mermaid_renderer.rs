//! 基于 chromiumoxide 的 mermaid 渲染器
//!
//! 每个任务启动一个独立的无头浏览器：
//! 加载空白页面 → 注入图表定义并调用 mermaid → 按扩展名导出 SVG / PNG / PDF

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, PrintToPdfParams, Viewport};
use chromiumoxide::page::ScreenshotParams;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tokio::fs;
use tracing::{debug, info};

use crate::browser::headless::{launch_headless_browser, HeadlessBrowser};
use crate::browser::page_template::{page_html, render_script, SVG_BOUNDS_SCRIPT, SVG_MARKUP_SCRIPT};
use crate::error::{AppError, AppResult, BrowserError, FileError, RenderError};
use crate::infrastructure::JsExecutor;
use crate::models::{
    load_css, load_launch_config, load_mermaid_config, BrowserLaunchConfig, OutputFormat,
    RenderOptions,
};
use crate::services::Renderer;
use crate::utils::with_deadline;

/// mermaid 渲染器（无状态，可在多个任务间共享）
#[derive(Debug, Default, Clone)]
pub struct MermaidRenderer;

impl MermaidRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// 启动浏览器前准备好的全部输入
struct PreparedRender {
    definition: String,
    format: OutputFormat,
    mermaid_config: JsonValue,
    launch: BrowserLaunchConfig,
    css: Option<String>,
}

/// 页面脚本的返回值
#[derive(Debug, Deserialize)]
struct ScriptOutcome {
    error: Option<String>,
}

/// svg 在页面中的位置
#[derive(Debug, Deserialize)]
struct SvgBounds {
    found: bool,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
}

/// 检查参数、读取所有外部文件。任何一项出错都不会启动浏览器
async fn prepare(input: &Path, output: &Path, options: &RenderOptions) -> AppResult<PreparedRender> {
    if !input.exists() {
        return Err(AppError::file_not_found(input));
    }

    let format = OutputFormat::from_path(output)?;

    let output_dir = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !output_dir.is_dir() {
        return Err(FileError::DirectoryNotFound { path: output_dir }.into());
    }

    let mermaid_config =
        load_mermaid_config(&options.theme, options.mermaid_config_file.as_deref()).await?;
    let launch = load_launch_config(options.browser_config_file.as_deref()).await?;
    let css = load_css(options.css_file.as_deref()).await?;

    let definition = fs::read_to_string(input)
        .await
        .map_err(|e| AppError::file_read_failed(input, e))?;

    Ok(PreparedRender {
        definition,
        format,
        mermaid_config,
        launch,
        css,
    })
}

/// 每个任务独立的浏览器用户数据目录，放在输入文件旁边（即临时目录中）
fn profile_dir_for(input: &Path) -> PathBuf {
    input.with_extension("profile")
}

#[async_trait]
impl Renderer for MermaidRenderer {
    async fn render(&self, input: &Path, output: &Path, options: &RenderOptions) -> AppResult<()> {
        let prepared = prepare(input, output, options).await?;
        debug!(
            "渲染 {} → {} ({:?})",
            input.display(),
            output.display(),
            prepared.format
        );

        let browser = launch_headless_browser(
            &prepared.launch,
            options.width,
            options.height,
            &profile_dir_for(input),
        )
        .await?;

        // 时限在这里生效，超时也会走到下面的关闭
        let result = with_deadline(
            options.render_timeout,
            output,
            render_in_browser(&browser, &prepared, output, options),
        )
        .await;

        browser.close().await;

        result
    }
}

async fn render_in_browser(
    browser: &HeadlessBrowser,
    prepared: &PreparedRender,
    output: &Path,
    options: &RenderOptions,
) -> AppResult<()> {
    let page = browser.new_page(options.width, options.height).await?;

    page.set_content(page_html(&options.mermaid_script_url))
        .await
        .map_err(|e| BrowserError::NavigationFailed {
            source: Box::new(e),
        })?;

    let executor = JsExecutor::new(page);

    let script = render_script(
        &prepared.definition,
        &prepared.mermaid_config,
        prepared.css.as_deref(),
        &options.background_color,
    )?;
    let outcome: ScriptOutcome = executor.eval_as(script).await?;
    if let Some(message) = outcome.error {
        return Err(AppError::mermaid_failed(message));
    }

    let bytes = match prepared.format {
        OutputFormat::Svg => {
            let svg: String = executor.eval_as(SVG_MARKUP_SCRIPT).await?;
            svg.into_bytes()
        }
        OutputFormat::Png => capture_png(&executor, options.is_transparent()).await?,
        OutputFormat::Pdf => capture_pdf(&executor, options.is_transparent()).await?,
    };

    fs::write(output, &bytes)
        .await
        .map_err(|e| AppError::file_write_failed(output, e))?;

    info!("🖼️ 已写入 {} ({} 字节)", output.display(), bytes.len());
    Ok(())
}

/// 截图，裁剪到 svg 的边界
async fn capture_png(executor: &JsExecutor, transparent: bool) -> AppResult<Vec<u8>> {
    let bounds: SvgBounds = executor.eval_as(SVG_BOUNDS_SCRIPT).await?;
    if !bounds.found {
        return Err(RenderError::DiagramNotFound.into());
    }

    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .clip(Viewport {
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            scale: 1.0,
        })
        .capture_beyond_viewport(true)
        .omit_background(transparent)
        .build();

    executor.page().screenshot(params).await.map_err(|e| {
        AppError::from(BrowserError::CaptureFailed {
            source: Box::new(e),
        })
    })
}

/// 打印为 PDF
async fn capture_pdf(executor: &JsExecutor, transparent: bool) -> AppResult<Vec<u8>> {
    let params = PrintToPdfParams {
        print_background: Some(!transparent),
        ..Default::default()
    };

    executor.page().pdf(params).await.map_err(|e| {
        AppError::from(BrowserError::CaptureFailed {
            source: Box::new(e),
        })
    })
}
