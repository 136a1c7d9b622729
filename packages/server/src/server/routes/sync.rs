use axum::{extract::Extension, Json};

use crate::domains::sync::{run_sync, SyncReport};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// `POST /sync` - run one sync batch now and return its report.
///
/// Answers 503 if a scheduled run is already in progress.
pub async fn sync_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<SyncReport>, ApiError> {
    let report = run_sync(&state.deps, &state.shutdown.child_token()).await?;
    Ok(Json(report))
}
