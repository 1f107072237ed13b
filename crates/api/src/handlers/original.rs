//! Synchronous handler (`/original`): runs the work unit inline and holds
//! the connection open until it finishes.

use axum::extract::State;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /original
///
/// Return the work unit's result as plain text. A failing work unit is a
/// 500 with a sanitized message.
pub async fn run_inline(State(state): State<AppState>) -> AppResult<String> {
    tracing::info!("Synchronous request invoked");
    let result = state
        .work
        .process()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::info!("Synchronous request returning now");
    Ok(result)
}
