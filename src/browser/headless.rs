use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult, BrowserError};
use crate::models::BrowserLaunchConfig;

/// 一个无头浏览器进程及其事件处理任务
pub struct HeadlessBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
}

/// 启动无头浏览器
///
/// # 参数
/// - `launch`: 浏览器启动配置
/// - `width` / `height`: 窗口尺寸
/// - `profile_dir`: 启动配置没有指定用户数据目录时使用的目录
pub async fn launch_headless_browser(
    launch: &BrowserLaunchConfig,
    width: u32,
    height: u32,
    profile_dir: &Path,
) -> AppResult<HeadlessBrowser> {
    info!("🚀 启动无头浏览器...");

    let config = build_browser_config(launch, width, height, profile_dir)?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        AppError::browser_launch_failed(e)
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    let handler = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    Ok(HeadlessBrowser { browser, handler })
}

fn build_browser_config(
    launch: &BrowserLaunchConfig,
    width: u32,
    height: u32,
    profile_dir: &Path,
) -> AppResult<BrowserConfig> {
    let mut builder = BrowserConfig::builder();

    builder = if launch.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };

    if let Some(executable) = &launch.executable_path {
        debug!("浏览器可执行文件: {}", executable.display());
        builder = builder.chrome_executable(executable);
    }

    if launch.no_sandbox {
        builder = builder.no_sandbox();
    }

    if let Some(timeout_ms) = launch.request_timeout_ms {
        builder = builder.request_timeout(Duration::from_millis(timeout_ms));
    }

    // 并发任务不能共用同一个用户数据目录
    let user_data_dir = launch.user_data_dir.as_deref().unwrap_or(profile_dir);

    builder
        .user_data_dir(user_data_dir)
        .window_size(width, height)
        .args(
            ["--disable-gpu", "--disable-dev-shm-usage"]
                .into_iter()
                .map(String::from)
                .chain(launch.args.iter().cloned()),
        )
        .build()
        .map_err(|message| {
            error!("配置无头浏览器失败: {}", message);
            AppError::from(BrowserError::ConfigurationFailed { message })
        })
}

impl HeadlessBrowser {
    /// 创建空白页面并设置视口尺寸
    pub async fn new_page(&self, width: u32, height: u32) -> AppResult<Page> {
        let page = self.browser.new_page("about:blank").await.map_err(|e| {
            error!("创建页面失败: {}", e);
            BrowserError::PageCreationFailed {
                source: Box::new(e),
            }
        })?;

        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(width),
            i64::from(height),
            1.0,
            false,
        ))
        .await
        .map_err(|e| BrowserError::PageCreationFailed {
            source: Box::new(e),
        })?;

        Ok(page)
    }

    /// 关闭浏览器并等待事件处理任务结束
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器退出失败: {}", e);
        }
        if let Err(e) = self.handler.await {
            warn!("浏览器事件任务异常结束: {}", e);
        }
        debug!("浏览器已关闭");
    }
}
