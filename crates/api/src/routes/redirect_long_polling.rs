//! Route definitions for the redirect presentation.

use axum::routing::get;
use axum::Router;

use crate::handlers::redirect_long_polling;
use crate::state::AppState;

/// Routes mounted at `/redirectLongPolling`.
///
/// ```text
/// GET    /                -> submit_job
/// GET    /{id}            -> get_job_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(redirect_long_polling::submit_job))
        .route("/{id}", get(redirect_long_polling::get_job_status))
}
