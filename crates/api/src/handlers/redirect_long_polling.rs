//! Handlers for the redirect presentation (`/redirectLongPolling`).
//!
//! Submission redirects the client to the job's polling location. Polling
//! that location returns the raw result once finished, redirects back to
//! itself while the job is still running, and answers `Task failed` on
//! failure.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use longpoll_core::types::JobId;
use longpoll_core::JobState;

use crate::error::AppResult;
use crate::query::PollParams;
use crate::state::AppState;

/// Mount point of the redirect presentation.
pub const BASE_PATH: &str = "/redirectLongPolling";

/// Body returned when a job failed.
pub const TASK_FAILED: &str = "Task failed";

/// Canonical polling location for `id`, carrying any explicit wait along.
pub fn status_location(id: JobId, params: &PollParams) -> String {
    match params.wait_ms {
        Some(wait_ms) => format!("{BASE_PATH}/{id}?wait_ms={wait_ms}"),
        None => format!("{BASE_PATH}/{id}"),
    }
}

/// GET /redirectLongPolling
///
/// Submit a new job and redirect to its polling location.
pub async fn submit_job(
    State(state): State<AppState>,
    Query(params): Query<PollParams>,
) -> Redirect {
    tracing::info!("New job request arrived");
    let id = state.registry.submit(state.work.process()).await;
    Redirect::to(&status_location(id, &params))
}

/// GET /redirectLongPolling/{id}
///
/// Wait up to the poll timeout, then answer with the result text, a
/// redirect to the same location, or `Task failed`.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
    Query(params): Query<PollParams>,
) -> AppResult<Response> {
    tracing::info!(job_id = id, "Going to fetch the status of job");
    let wait = params.wait(state.registry.poll_timeout());

    let response = match state.registry.status_within(id, wait).await? {
        JobState::Finished(result) => result.into_response(),
        JobState::Failed => TASK_FAILED.into_response(),
        JobState::Submitted | JobState::Running => {
            Redirect::to(&status_location(id, &params)).into_response()
        }
    };
    Ok(response)
}
