//! Board registry - maps board ids to adapters.
//!
//! Built once at startup and shared behind an `Arc`. There is no way to
//! mutate a registry after construction, so lookups need no locking.
//!
//! # Example
//!
//! ```ignore
//! let client = boards::http::build_client()?;
//! let registry = BoardRegistry::with_defaults(client);
//!
//! let adapter = registry.resolve("greenhouse").expect("known board");
//! let jobs = adapter.fetch("acme").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::{Ashby, BambooHr, BoardAdapter, Greenhouse, Lever, Workable};

#[derive(Clone, Default)]
pub struct BoardRegistry {
    adapters: HashMap<&'static str, Arc<dyn BoardAdapter>>,
}

impl BoardRegistry {
    /// Registry with no adapters (tests compose their own).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every supported provider, sharing one HTTP client.
    pub fn with_defaults(client: reqwest::Client) -> Self {
        Self::empty()
            .with_adapter(Arc::new(Ashby::new(client.clone())))
            .with_adapter(Arc::new(BambooHr::new(client.clone())))
            .with_adapter(Arc::new(Greenhouse::new(client.clone())))
            .with_adapter(Arc::new(Lever::new(client.clone())))
            .with_adapter(Arc::new(Workable::new(client)))
    }

    /// Register an adapter under its board id, replacing any previous one.
    pub fn with_adapter(mut self, adapter: Arc<dyn BoardAdapter>) -> Self {
        self.adapters.insert(adapter.board(), adapter);
        self
    }

    pub fn resolve(&self, board: &str) -> Option<Arc<dyn BoardAdapter>> {
        self.adapters.get(board).cloned()
    }

    /// Registered board ids, sorted.
    pub fn boards(&self) -> Vec<&'static str> {
        let mut boards: Vec<_> = self.adapters.keys().copied().collect();
        boards.sort_unstable();
        boards
    }
}

impl std::fmt::Debug for BoardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardRegistry")
            .field("boards", &self.boards())
            .finish()
    }
}
