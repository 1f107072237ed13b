//! Handlers for the status-object presentation (`/longPolling`).
//!
//! Submission answers immediately with the new job id; status requests
//! wait at most the poll timeout and report where the job stands.

use axum::extract::{Path, Query, State};
use axum::Json;
use longpoll_core::types::JobId;

use crate::error::AppResult;
use crate::query::PollParams;
use crate::response::TaskStatus;
use crate::state::AppState;

/// GET|POST /longPolling
///
/// Submit a new job. Always answers `Submitted` with a `null` result.
pub async fn submit_job(State(state): State<AppState>) -> Json<TaskStatus> {
    tracing::info!("New job request arrived");
    let id = state.registry.submit(state.work.process()).await;
    Json(TaskStatus::submitted(id))
}

/// GET /longPolling/{id}
///
/// Wait up to the poll timeout (or `?wait_ms=`, if shorter), then report
/// `Running`, `Finished` with the result, or `Failed`. Unknown ids are 404.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
    Query(params): Query<PollParams>,
) -> AppResult<Json<TaskStatus>> {
    tracing::info!(job_id = id, "Going to fetch the status of job");
    let wait = params.wait(state.registry.poll_timeout());
    let job_state = state.registry.status_within(id, wait).await?;
    Ok(Json(TaskStatus::new(id, &job_state)))
}
