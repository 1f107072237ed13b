pub mod health;
pub mod long_polling;
pub mod original;
pub mod redirect_long_polling;

use axum::Router;

use crate::handlers::redirect_long_polling::BASE_PATH as REDIRECT_BASE_PATH;
use crate::state::AppState;

/// Build the job route tree.
///
/// Route hierarchy:
///
/// ```text
/// /longPolling                    submit (GET, POST), JSON status object
/// /longPolling/{id}               bounded-wait status (GET)
///
/// /redirectLongPolling            submit, redirect to polling location (GET)
/// /redirectLongPolling/{id}       result text, self-redirect, or "Task failed" (GET)
///
/// /original                       run the work unit inline (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/longPolling", long_polling::router())
        .nest(REDIRECT_BASE_PATH, redirect_long_polling::router())
        .nest("/original", original::router())
}
