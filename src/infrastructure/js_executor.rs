//! JS 执行器 - 基础设施层
//!
//! 持有页面资源，只暴露"执行 JS"的能力

use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{AppResult, BrowserError};

/// JS 执行器
///
/// 职责：
/// - 持有 Page 资源
/// - 暴露 eval() 能力
/// - 不认识图表 / 文档
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// 创建新的 JS 执行器
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于截图等其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 表达式并返回 JSON 结果（会等待 Promise 完成）
    ///
    /// 总是按表达式求值，`(async () => { ... })()` 不会被当成函数声明
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let params = EvaluateParams::builder()
            .expression(js_code.into())
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(|message| BrowserError::ScriptExecutionFailed {
                source: message.into(),
            })?;
        let result = self
            .page
            .evaluate_expression(params)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed {
                source: Box::new(e),
            })?;
        let json_value = result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed {
                source: Box::new(e),
            })?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }
}
