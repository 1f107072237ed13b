//! Job outcome and client-visible job state.
//!
//! A [`JobOutcome`] is what a handle eventually holds; a [`JobState`] is
//! what a status query reports. The state is derived on every query and is
//! never stored in the registry.

use crate::error::WorkUnitError;

/// Terminal result of a work unit, published exactly once per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Finished(String),
    Failed(WorkUnitError),
}

impl From<Result<String, WorkUnitError>> for JobOutcome {
    fn from(result: Result<String, WorkUnitError>) -> Self {
        match result {
            Ok(value) => JobOutcome::Finished(value),
            Err(err) => JobOutcome::Failed(err),
        }
    }
}

/// Client-visible classification of a job.
///
/// `Submitted` is only ever reported by the submit call itself; a later
/// query that has not observed completion reports `Running`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Submitted,
    Running,
    Finished(String),
    Failed,
}

impl JobState {
    /// Status label used by the presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            JobState::Submitted => "Submitted",
            JobState::Running => "Running",
            JobState::Finished(_) => "Finished",
            JobState::Failed => "Failed",
        }
    }

    /// The work unit's value, present only for `Finished`.
    pub fn result(&self) -> Option<&str> {
        match self {
            JobState::Finished(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished(_) | JobState::Failed)
    }
}

impl From<Option<JobOutcome>> for JobState {
    /// `None` means the bounded wait expired before an outcome was seen.
    fn from(outcome: Option<JobOutcome>) -> Self {
        match outcome {
            None => JobState::Running,
            Some(JobOutcome::Finished(value)) => JobState::Finished(value),
            Some(JobOutcome::Failed(_)) => JobState::Failed,
        }
    }
}
