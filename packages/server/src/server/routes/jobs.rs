use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::Job;
use crate::domains::jobs::get_jobs;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Missing parameters decode as empty strings and are rejected by the
/// board lookup or the adapter, so the caller gets the usual error body.
#[derive(Debug, Deserialize)]
pub struct GetJobsParams {
    #[serde(default)]
    pub board: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Serialize)]
pub struct GetJobsResponse {
    pub jobs: Vec<Job>,
}

/// `GET /jobs?board=<board>&company=<company>`
///
/// Fetches live from the board; nothing is cached or written.
pub async fn get_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<GetJobsParams>,
) -> Result<Json<GetJobsResponse>, ApiError> {
    let jobs = get_jobs(&state.deps.boards, &params.board, &params.company).await?;
    Ok(Json(GetJobsResponse { jobs }))
}
