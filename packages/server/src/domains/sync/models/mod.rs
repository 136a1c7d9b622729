pub mod sync_report;

pub use sync_report::{FailureDetail, JobFailure, JobStage, SourceReport, SourceStatus, SyncReport};
