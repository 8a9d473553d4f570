pub mod block_scanner;
pub mod filename_resolver;
pub mod notifier;
pub mod renderer;

pub use block_scanner::{BlockScanner, LINE_ENDING};
pub use filename_resolver::FilenameResolver;
pub use notifier::{LogFileNotifier, MemoryNotifier, Notification, Notifier, TracingNotifier};
pub use renderer::Renderer;
