pub mod headless;
pub mod mermaid_renderer;
pub mod page_template;

pub use headless::{launch_headless_browser, HeadlessBrowser};
pub use mermaid_renderer::MermaidRenderer;
