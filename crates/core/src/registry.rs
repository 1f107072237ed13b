//! In-memory job registry.
//!
//! Maps job ids to the handles of their in-flight (or completed) work and
//! answers bounded-wait status queries. Thread-safe via an interior
//! `RwLock`; designed to be wrapped in `Arc` and shared across request
//! handlers and background tasks.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::engine::ExecutionEngine;
use crate::error::CoreError;
use crate::handle::JobHandle;
use crate::job::JobState;
use crate::types::{JobId, Timestamp};
use crate::work::WorkResult;

/// Default bounded wait for a status query.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Entity name used in not-found errors.
const JOB_ENTITY: &str = "Job";

pub struct JobRegistry {
    engine: ExecutionEngine,
    jobs: RwLock<HashMap<JobId, JobHandle>>,
    next_id: AtomicI64,
    poll_timeout: Duration,
}

impl JobRegistry {
    pub fn new(engine: ExecutionEngine, poll_timeout: Duration) -> Self {
        Self {
            engine,
            jobs: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            poll_timeout,
        }
    }

    /// The bounded wait applied by [`JobRegistry::status`].
    pub fn poll_timeout(&self) -> Duration {
        self.poll_timeout
    }

    pub fn engine(&self) -> &ExecutionEngine {
        &self.engine
    }

    /// Hand `work` to the engine and start tracking it.
    ///
    /// Returns as soon as the job is registered; never waits for the work
    /// itself.
    pub async fn submit<F>(&self, work: F) -> JobId
    where
        F: Future<Output = WorkResult> + Send + 'static,
    {
        let handle = self.engine.execute(work);
        self.track(handle).await
    }

    /// Like [`JobRegistry::submit`], for a synchronous, blocking callable.
    pub async fn submit_blocking<F>(&self, work: F) -> JobId
    where
        F: FnOnce() -> WorkResult + Send + 'static,
    {
        let handle = self.engine.execute_blocking(work);
        self.track(handle).await
    }

    async fn track(&self, handle: JobHandle) -> JobId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.jobs.write().await.insert(id, handle);
        tracing::info!(job_id = id, "Job submitted");
        id
    }

    /// Status of `id` after waiting at most the configured poll timeout.
    pub async fn status(&self, id: JobId) -> Result<JobState, CoreError> {
        self.status_within(id, self.poll_timeout).await
    }

    /// Status of `id` after waiting at most `wait`.
    ///
    /// The registry lock is released before waiting, so a slow poll never
    /// holds up submissions or other polls.
    pub async fn status_within(&self, id: JobId, wait: Duration) -> Result<JobState, CoreError> {
        let handle = self.handle(id).await?;
        let state = JobState::from(handle.wait(wait).await);

        match &state {
            JobState::Running => tracing::debug!(job_id = id, "Job is not yet finished"),
            JobState::Failed => tracing::warn!(job_id = id, "Job failed"),
            _ => tracing::debug!(job_id = id, status = state.label(), "Job status fetched"),
        }

        Ok(state)
    }

    /// Clone of the handle tracked under `id`.
    pub async fn handle(&self, id: JobId) -> Result<JobHandle, CoreError> {
        self.jobs
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: JOB_ENTITY,
                id,
            })
    }

    /// Number of tracked jobs, finished or not.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Stop tracking jobs whose outcome was recorded before `cutoff`.
    ///
    /// Jobs still in flight are always kept. Returns the number of entries
    /// removed.
    pub async fn evict_completed_before(&self, cutoff: Timestamp) -> usize {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|_, handle| match handle.completion() {
            Some(done) => done.completed_at >= cutoff,
            None => true,
        });
        before - jobs.len()
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new(ExecutionEngine::default(), DEFAULT_POLL_TIMEOUT)
    }
}
