//! 渲染能力 - 业务能力层
//!
//! 渲染器从磁盘读取图表定义，把结果写到输出路径。
//! 流程层只依赖这个 trait，测试时可以换成假的实现

use std::path::Path;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::RenderOptions;

#[async_trait]
pub trait Renderer: Send + Sync {
    /// 把 `input` 中的图表定义渲染到 `output`，格式由 `output` 的扩展名决定
    ///
    /// 实现需要自己遵守 `options.render_timeout`，超时后先释放占用的资源再返回
    async fn render(&self, input: &Path, output: &Path, options: &RenderOptions) -> AppResult<()>;
}
