// HTTP routes
pub mod health;
pub mod jobs;
pub mod sync;

pub use health::*;
pub use jobs::*;
pub use sync::*;
