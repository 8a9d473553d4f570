pub mod config_loader;

pub use config_loader::{load_css, load_launch_config, load_mermaid_config};
