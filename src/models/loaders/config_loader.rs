//! 渲染所需外部文件的加载
//!
//! mermaid 配置、浏览器启动配置、CSS 文件

use std::path::Path;

use serde_json::{json, Map, Value as JsonValue};
use tokio::fs;

use crate::error::{AppError, AppResult, ConfigError};
use crate::models::BrowserLaunchConfig;

/// 检查配置文件是否存在
fn check_config_file(path: &Path) -> AppResult<()> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

async fn read_json_object(path: &Path) -> AppResult<Map<String, JsonValue>> {
    check_config_file(path)?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;

    let value: JsonValue =
        serde_json::from_str(&content).map_err(|e| ConfigError::JsonParseFailed {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    match value {
        JsonValue::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }
        .into()),
    }
}

/// 加载 mermaid 配置
///
/// 以 `{ "theme": theme }` 为基础，文件中的顶层字段直接覆盖（浅合并）
pub async fn load_mermaid_config(theme: &str, config_file: Option<&Path>) -> AppResult<JsonValue> {
    let mut config = json!({ "theme": theme });

    if let Some(path) = config_file {
        let overrides = read_json_object(path).await?;
        if let Some(base) = config.as_object_mut() {
            base.extend(overrides);
        }
    }

    Ok(config)
}

/// 加载浏览器启动配置，未指定文件时使用默认值
pub async fn load_launch_config(config_file: Option<&Path>) -> AppResult<BrowserLaunchConfig> {
    let Some(path) = config_file else {
        return Ok(BrowserLaunchConfig::default());
    };

    let map = read_json_object(path).await?;
    serde_json::from_value(JsonValue::Object(map)).map_err(|e| {
        AppError::from(ConfigError::JsonParseFailed {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    })
}

/// 读取 CSS 文件原文
pub async fn load_css(css_file: Option<&Path>) -> AppResult<Option<String>> {
    let Some(path) = css_file else {
        return Ok(None);
    };

    if !path.exists() {
        return Err(AppError::file_not_found(path));
    }

    let css = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;
    Ok(Some(css))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mermaid_config_without_file() {
        let config = load_mermaid_config("forest", None).await.unwrap();
        assert_eq!(config, json!({ "theme": "forest" }));
    }

    #[tokio::test]
    async fn test_mermaid_config_file_overrides_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mermaid.json");
        std::fs::write(&path, r#"{ "theme": "dark", "flowchart": { "curve": "basis" } }"#).unwrap();

        let config = load_mermaid_config("default", Some(&path)).await.unwrap();
        assert_eq!(config["theme"], "dark");
        assert_eq!(config["flowchart"]["curve"], "basis");
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let err = load_mermaid_config("default", Some(Path::new("/no/such/mermaid.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_config_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launch.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = load_launch_config(Some(&path)).await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::NotAnObject { .. })));
    }

    #[tokio::test]
    async fn test_launch_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launch.json");
        std::fs::write(&path, r#"{ "headless": false, "noSandbox": true }"#).unwrap();

        let config = load_launch_config(Some(&path)).await.unwrap();
        assert!(!config.headless);
        assert!(config.no_sandbox);
    }

    #[tokio::test]
    async fn test_css_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.css");
        std::fs::write(&path, ".node rect { fill: red; }\n").unwrap();

        assert_eq!(
            load_css(Some(&path)).await.unwrap().as_deref(),
            Some(".node rect { fill: red; }\n")
        );
        assert_eq!(load_css(None).await.unwrap(), None);
        assert!(load_css(Some(Path::new("/no/such.css"))).await.is_err());
    }
}
