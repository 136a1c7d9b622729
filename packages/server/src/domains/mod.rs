// Business domains
pub mod boards;
pub mod jobs;
pub mod sync;
