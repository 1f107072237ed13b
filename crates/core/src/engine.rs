//! Execution engine: runs work units on a bounded pool of tokio tasks.
//!
//! Every submission gets its own task, gated by a semaphore sized to the
//! worker count. A second, supervising task awaits the worker's
//! `JoinHandle` and publishes exactly one outcome to the job handle, so
//! errors, panics, and aborted workers all surface as a failure outcome
//! instead of escaping to the engine or to pollers.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinError;

use crate::error::WorkUnitError;
use crate::handle::JobHandle;
use crate::job::JobOutcome;
use crate::work::WorkResult;

/// Default number of work units allowed to run at once.
pub const DEFAULT_MAX_WORKERS: usize = 16;

/// Bounded worker pool producing a [`JobHandle`] per submission.
///
/// Cheap to clone; clones share the same pool.
#[derive(Debug, Clone)]
pub struct ExecutionEngine {
    permits: Arc<Semaphore>,
    max_workers: usize,
}

impl ExecutionEngine {
    /// Create an engine that runs at most `max_workers` units at once.
    ///
    /// A value of zero is raised to one.
    pub fn new(max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Number of workers currently running a unit.
    pub fn busy_workers(&self) -> usize {
        self.max_workers - self.permits.available_permits()
    }

    /// Start `work` on the pool and return its handle immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn execute<F>(&self, work: F) -> JobHandle
    where
        F: Future<Output = WorkResult> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let worker = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| WorkUnitError::Interrupted)?;
            work.await
        });
        supervise(worker)
    }

    /// Start a synchronous, blocking callable on the blocking thread pool.
    ///
    /// The pool bound applies here too: the callable does not start until
    /// a worker permit is free.
    pub fn execute_blocking<F>(&self, work: F) -> JobHandle
    where
        F: FnOnce() -> WorkResult + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let worker = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| WorkUnitError::Interrupted)?;
            tokio::task::spawn_blocking(work)
                .await
                .map_err(|e| join_error(&e))?
        });
        supervise(worker)
    }
}

impl Default for ExecutionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WORKERS)
    }
}

/// Await the worker and publish its outcome exactly once.
fn supervise(worker: tokio::task::JoinHandle<WorkResult>) -> JobHandle {
    let (completer, handle) = JobHandle::channel();
    tokio::spawn(async move {
        let result = match worker.await {
            Ok(result) => result,
            Err(e) => Err(join_error(&e)),
        };
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Work unit did not produce a value");
        }
        completer.complete(JobOutcome::from(result));
    });
    handle
}

fn join_error(err: &JoinError) -> WorkUnitError {
    if err.is_panic() {
        WorkUnitError::Panicked
    } else {
        WorkUnitError::Interrupted
    }
}
