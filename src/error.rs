use std::path::{Path, PathBuf};

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 渲染任务错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 加载页面内容失败
    #[error("加载页面内容失败: {source}")]
    NavigationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
    /// 截图或导出 PDF 失败
    #[error("导出失败: {source}")]
    CaptureFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 渲染任务错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 输出文件扩展名不受支持
    #[error("Output file must end with \".svg\", \".png\" or \".pdf\": {}", path.display())]
    UnsupportedOutputFormat { path: PathBuf },
    /// 页面中没有渲染出图表
    #[error("页面中没有找到渲染后的图表")]
    DiagramNotFound,
    /// mermaid 脚本加载或执行失败
    #[error("mermaid 渲染失败: {message}")]
    MermaidFailed { message: String },
    /// 渲染超时
    #[error("渲染超时 ({secs} 秒): {}", output.display())]
    Timeout { output: PathBuf, secs: u64 },
    /// 任务异常退出
    #[error("渲染任务异常退出: {message}")]
    TaskAborted { message: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建临时目录失败
    #[error("创建临时目录失败: {source}")]
    WorkspaceFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    #[error("目录不存在: {}", path.display())]
    DirectoryNotFound { path: PathBuf },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("Configuration file \"{}\" doesn't exist", path.display())]
    FileNotFound { path: PathBuf },
    /// JSON 配置解析失败
    #[error("JSON 配置解析失败 ({}): {source}", path.display())]
    JsonParseFailed {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// JSON 配置不是对象
    #[error("JSON 配置必须是对象: {}", path.display())]
    NotAnObject { path: PathBuf },
    /// TOML 配置解析失败
    #[error("TOML 配置解析失败: {source}")]
    TomlParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Other(format!("JSON 处理失败: {}", err))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(ConfigError::TomlParseFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器启动错误
    pub fn browser_launch_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::LaunchFailed {
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl AsRef<Path>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.as_ref().to_path_buf(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl AsRef<Path>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source: Box::new(source),
        })
    }

    /// 创建文件不存在错误
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        AppError::File(FileError::NotFound {
            path: path.as_ref().to_path_buf(),
        })
    }

    /// 创建 mermaid 渲染错误
    pub fn mermaid_failed(message: impl Into<String>) -> Self {
        AppError::Render(RenderError::MermaidFailed {
            message: message.into(),
        })
    }

    /// 不带分类前缀的错误信息，mermaid 错误只保留 mermaid 给出的原文
    pub fn detail(&self) -> String {
        match self {
            AppError::Render(RenderError::MermaidFailed { message }) => message.clone(),
            AppError::Browser(e) => e.to_string(),
            AppError::Render(e) => e.to_string(),
            AppError::File(e) => e.to_string(),
            AppError::Config(e) => e.to_string(),
            AppError::Other(message) => message.clone(),
        }
    }

    /// 是否为"输出格式不支持"错误
    pub fn is_unsupported_output(&self) -> bool {
        matches!(
            self,
            AppError::Render(RenderError::UnsupportedOutputFormat { .. })
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
