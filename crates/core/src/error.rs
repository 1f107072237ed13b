use crate::types::JobId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: JobId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a work unit did not produce a value.
///
/// Captured at the handle boundary; pollers only ever see it as a
/// `Failed` job state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkUnitError {
    /// The work unit returned an error of its own.
    #[error("Work unit failed: {0}")]
    Failed(String),

    /// The work unit panicked while running.
    #[error("Work unit panicked")]
    Panicked,

    /// The worker running the unit was stopped before it finished.
    #[error("Work unit was interrupted")]
    Interrupted,
}
