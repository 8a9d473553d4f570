use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError};

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "MERMAID_RENDER_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// mermaid 主题
    pub theme: String,
    /// 视口宽度
    pub width: u32,
    /// 视口高度
    pub height: u32,
    /// 背景色（`transparent` 表示透明）
    pub background_color: String,
    /// mermaid 配置文件（JSON）
    pub mermaid_config_file: Option<PathBuf>,
    /// 浏览器启动配置文件（JSON）
    pub browser_config_file: Option<PathBuf>,
    /// 自定义 CSS 文件
    pub css_file: Option<PathBuf>,
    /// mermaid 脚本地址
    pub mermaid_script_url: String,
    /// 同时渲染的图表数量
    pub max_concurrent_jobs: usize,
    /// 单个图表的渲染超时（秒）
    pub render_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            width: 800,
            height: 600,
            background_color: "white".to_string(),
            mermaid_config_file: None,
            browser_config_file: None,
            css_file: None,
            mermaid_script_url: "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js"
                .to_string(),
            max_concurrent_jobs: 4,
            render_timeout_secs: 60,
            verbose_logging: false,
            output_log_file: "render_mermaid.log".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：TOML 文件（可选）→ 环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        base.with_env_overrides()
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            theme: env_string("MERMAID_THEME").unwrap_or(self.theme),
            width: env_parse("MERMAID_WIDTH", "u32")?.unwrap_or(self.width),
            height: env_parse("MERMAID_HEIGHT", "u32")?.unwrap_or(self.height),
            background_color: env_string("MERMAID_BACKGROUND").unwrap_or(self.background_color),
            mermaid_config_file: env_string("MERMAID_CONFIG_FILE")
                .map(PathBuf::from)
                .or(self.mermaid_config_file),
            browser_config_file: env_string("MERMAID_BROWSER_CONFIG_FILE")
                .map(PathBuf::from)
                .or(self.browser_config_file),
            css_file: env_string("MERMAID_CSS_FILE")
                .map(PathBuf::from)
                .or(self.css_file),
            mermaid_script_url: env_string("MERMAID_SCRIPT_URL")
                .unwrap_or(self.mermaid_script_url),
            max_concurrent_jobs: env_parse("MAX_CONCURRENT_JOBS", "usize")?
                .unwrap_or(self.max_concurrent_jobs),
            render_timeout_secs: env_parse("RENDER_TIMEOUT_SECS", "u64")?
                .unwrap_or(self.render_timeout_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
            output_log_file: env_string("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
        })
    }

    /// 渲染超时；配置为 0 时不限制
    pub fn render_timeout(&self) -> Option<Duration> {
        (self.render_timeout_secs > 0).then(|| Duration::from_secs(self.render_timeout_secs))
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match env_string(var_name) {
        Some(value) => value.trim().parse().map(Some).map_err(|_| {
            AppError::from(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value: value.clone(),
                expected_type: expected_type.to_string(),
            })
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            theme = "dark"
            width = 1024
            css_file = "styles/diagram.css"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, "dark");
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.css_file, Some(PathBuf::from("styles/diagram.css")));
        assert_eq!(config.max_concurrent_jobs, 4);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::TomlParseFailed { .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file(Path::new("/no/such/render_mermaid.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_render_timeout_zero_disables() {
        let config = Config {
            render_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.render_timeout(), None);
        assert_eq!(Config::default().render_timeout(), Some(Duration::from_secs(60)));
    }
}
