use axum::routing::get;
use axum::Router;

use crate::handlers::original;
use crate::state::AppState;

/// Routes mounted at `/original`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(original::run_inline))
}
