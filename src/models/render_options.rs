use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;

/// 传给渲染器的参数
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// mermaid 主题
    pub theme: String,
    /// 视口宽度
    pub width: u32,
    /// 视口高度
    pub height: u32,
    /// 页面背景色，`transparent` 表示不合成背景
    pub background_color: String,
    /// mermaid 配置文件（JSON）
    pub mermaid_config_file: Option<PathBuf>,
    /// 浏览器启动配置文件（JSON）
    pub browser_config_file: Option<PathBuf>,
    /// 额外注入的 CSS 文件
    pub css_file: Option<PathBuf>,
    /// mermaid 脚本地址
    pub mermaid_script_url: String,
    /// 单个图表的渲染时限，`None` 表示不限制
    pub render_timeout: Option<Duration>,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme.clone(),
            width: config.width,
            height: config.height,
            background_color: config.background_color.clone(),
            mermaid_config_file: config.mermaid_config_file.clone(),
            browser_config_file: config.browser_config_file.clone(),
            css_file: config.css_file.clone(),
            mermaid_script_url: config.mermaid_script_url.clone(),
            render_timeout: config.render_timeout(),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.background_color == "transparent"
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 浏览器启动配置（JSON 文件，字段均可省略）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowserLaunchConfig {
    /// Chrome / Chromium / Edge 可执行文件路径
    pub executable_path: Option<PathBuf>,
    /// 额外的命令行参数
    pub args: Vec<String>,
    /// 是否无头模式
    pub headless: bool,
    /// 是否禁用沙盒
    pub no_sandbox: bool,
    /// 浏览器用户数据目录
    pub user_data_dir: Option<PathBuf>,
    /// CDP 请求超时（毫秒）
    pub request_timeout_ms: Option<u64>,
}

impl Default for BrowserLaunchConfig {
    fn default() -> Self {
        Self {
            executable_path: None,
            args: Vec::new(),
            headless: true,
            no_sandbox: false,
            user_data_dir: None,
            request_timeout_ms: None,
        }
    }
}
