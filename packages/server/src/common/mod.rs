// Common types and utilities shared across the application

pub mod error;
pub mod job;
pub mod lenient;

pub use error::{Error, ErrorKind, Result};
pub use job::{Job, JobId, JobSource};
