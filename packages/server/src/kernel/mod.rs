//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod notion_sink;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use notion_sink::{NotionJobSink, NotionSinkProvider};
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::{MockBoard, MockJobSink};
pub use traits::*;
