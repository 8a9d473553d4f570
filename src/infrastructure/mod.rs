pub mod js_executor;
pub mod workspace;

pub use js_executor::JsExecutor;
pub use workspace::TemporaryWorkspace;
