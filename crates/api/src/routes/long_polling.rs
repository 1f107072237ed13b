//! Route definitions for the status-object presentation.

use axum::routing::get;
use axum::Router;

use crate::handlers::long_polling;
use crate::state::AppState;

/// Routes mounted at `/longPolling`.
///
/// ```text
/// GET    /                -> submit_job
/// POST   /                -> submit_job
/// GET    /{id}            -> get_job_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(long_polling::submit_job).post(long_polling::submit_job),
        )
        .route("/{id}", get(long_polling::get_job_status))
}
