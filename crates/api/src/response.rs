//! Shared response types for the status-object presentation.

use longpoll_core::types::JobId;
use longpoll_core::JobState;
use serde::Serialize;

/// `{ "id", "status", "result" }` body returned by the status-object
/// endpoints. `result` is `null` unless the job finished.
#[derive(Debug, Serialize)]
pub struct TaskStatus {
    pub id: JobId,
    pub status: &'static str,
    pub result: Option<String>,
}

impl TaskStatus {
    pub fn new(id: JobId, state: &JobState) -> Self {
        Self {
            id,
            status: state.label(),
            result: state.result().map(str::to_owned),
        }
    }

    /// Body returned by the submit call itself.
    pub fn submitted(id: JobId) -> Self {
        Self::new(id, &JobState::Submitted)
    }
}
