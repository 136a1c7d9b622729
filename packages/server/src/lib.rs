// Job Sync - API Core
//
// Fetches current postings from hosted job boards (Ashby, BambooHR,
// Greenhouse, Lever, Workable) and records new ones in a Notion database.
// Board adapters live in domains/boards; the sync engine in domains/sync.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
