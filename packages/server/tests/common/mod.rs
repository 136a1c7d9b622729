// Common test utilities

pub mod fixtures;
pub mod harness;
pub mod upstream;

pub use fixtures::*;
pub use harness::*;
pub use upstream::*;
