//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{get_jobs_handler, health_handler, sync_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Cancelled on shutdown; manual sync runs hang off it
    pub shutdown: CancellationToken,
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>, shutdown: CancellationToken) -> Router {
    let app_state = AppState { deps, shutdown };

    Router::new()
        .route("/jobs", get(get_jobs_handler))
        // Manual trigger for the periodic sync; keep it off the public network
        .route("/sync", post(sync_handler))
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
}
