pub mod job_dispatcher;
pub mod render_job;

pub use job_dispatcher::JobDispatcher;
pub use render_job::{JobOutcome, RenderJob};
