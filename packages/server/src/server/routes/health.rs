use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    boards: Vec<&'static str>,
    sync_running: bool,
}

/// Health check endpoint
///
/// Always 200 while the process is serving; reports the registered boards
/// and whether a sync run is in progress. Never touches the sync guard.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        boards: state.deps.boards.boards(),
        sync_running: state.deps.is_sync_running(),
    })
}
