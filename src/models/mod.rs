pub mod block;
pub mod document;
pub mod loaders;
pub mod output_format;
pub mod render_options;

pub use block::{Block, ResolvedPaths};
pub use document::Document;
pub use loaders::{load_css, load_launch_config, load_mermaid_config};
pub use output_format::OutputFormat;
pub use render_options::{BrowserLaunchConfig, RenderOptions};
