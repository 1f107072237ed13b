//! Completion handle for a single job.
//!
//! The engine keeps the write half ([`Completer`]) and the registry keeps
//! the read half ([`JobHandle`]). The outcome is published once through a
//! `watch` channel, so every clone of the handle observes the same value
//! and repeated reads never change it.

use std::time::Duration;

use tokio::sync::watch;

use crate::error::WorkUnitError;
use crate::job::JobOutcome;
use crate::types::Timestamp;

/// Outcome of a job together with the moment it was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub outcome: JobOutcome,
    pub completed_at: Timestamp,
}

/// Read side of a job's completion slot.
#[derive(Debug, Clone)]
pub struct JobHandle {
    rx: watch::Receiver<Option<Completion>>,
}

/// Write side of a job's completion slot. Consumed on first use.
#[derive(Debug)]
pub(crate) struct Completer {
    tx: watch::Sender<Option<Completion>>,
}

impl Completer {
    pub(crate) fn complete(self, outcome: JobOutcome) {
        self.tx.send_replace(Some(Completion {
            outcome,
            completed_at: chrono::Utc::now(),
        }));
    }
}

impl JobHandle {
    /// Create an empty completion slot.
    pub(crate) fn channel() -> (Completer, JobHandle) {
        let (tx, rx) = watch::channel(None);
        (Completer { tx }, JobHandle { rx })
    }

    /// Whether an outcome has been published.
    pub fn is_done(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Outcome and completion time, if the job has completed.
    ///
    /// A completer dropped without publishing counts as an interrupted
    /// worker.
    pub fn completion(&self) -> Option<Completion> {
        if let Some(done) = self.rx.borrow().as_ref() {
            return Some(done.clone());
        }
        if self.rx.has_changed().is_err() {
            return Some(interrupted());
        }
        None
    }

    /// Outcome without waiting, if the job has completed.
    pub fn outcome(&self) -> Option<JobOutcome> {
        self.completion().map(|c| c.outcome)
    }

    /// Wait at most `timeout` for the outcome.
    ///
    /// Returns `None` if the wait expired first. Never waits longer than
    /// `timeout`, and never blocks the caller's thread.
    pub async fn wait(&self, timeout: Duration) -> Option<JobOutcome> {
        let mut rx = self.rx.clone();
        let outcome = match tokio::time::timeout(timeout, rx.wait_for(Option::is_some)).await {
            Err(_elapsed) => None,
            Ok(Ok(done)) => done.as_ref().map(|c| c.outcome.clone()),
            Ok(Err(_closed)) => Some(interrupted().outcome),
        };
        outcome
    }
}

fn interrupted() -> Completion {
    Completion {
        outcome: JobOutcome::Failed(WorkUnitError::Interrupted),
        completed_at: chrono::Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_expires_while_pending() {
        let (_completer, handle) = JobHandle::channel();

        assert!(!handle.is_done());
        assert_eq!(handle.wait(Duration::from_millis(20)).await, None);
        assert_eq!(handle.outcome(), None);
    }

    #[tokio::test]
    async fn wait_returns_published_outcome() {
        let (completer, handle) = JobHandle::channel();
        completer.complete(JobOutcome::Finished("abc".into()));

        assert!(handle.is_done());
        assert_eq!(
            handle.wait(Duration::from_millis(20)).await,
            Some(JobOutcome::Finished("abc".into()))
        );
        assert!(handle.completion().is_some());
    }

    #[tokio::test]
    async fn wait_wakes_when_outcome_arrives() {
        let (completer, handle) = JobHandle::channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            completer.complete(JobOutcome::Finished("late".into()));
        });

        assert_eq!(
            handle.wait(Duration::from_secs(5)).await,
            Some(JobOutcome::Finished("late".into()))
        );
    }

    #[tokio::test]
    async fn clones_observe_the_same_outcome() {
        let (completer, handle) = JobHandle::channel();
        let other = handle.clone();
        completer.complete(JobOutcome::Failed(WorkUnitError::Panicked));

        assert_eq!(handle.outcome(), other.outcome());
        assert_eq!(handle.completion(), other.completion());
    }

    #[tokio::test]
    async fn dropped_completer_reads_as_interrupted() {
        let (completer, handle) = JobHandle::channel();
        drop(completer);

        assert_eq!(
            handle.wait(Duration::from_millis(20)).await,
            Some(JobOutcome::Failed(WorkUnitError::Interrupted))
        );
        assert_eq!(
            handle.outcome(),
            Some(JobOutcome::Failed(WorkUnitError::Interrupted))
        );
    }
}
