//! Work unit contract and the placeholder long-running process.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::WorkUnitError;

/// Value or failure produced by one work unit invocation.
pub type WorkResult = Result<String, WorkUnitError>;

/// A single, not yet started, work unit invocation.
pub type WorkFuture = BoxFuture<'static, WorkResult>;

/// Source of work unit invocations.
///
/// Each call to [`WorkUnit::process`] yields a fresh invocation that does
/// nothing until it is polled, so it can be handed to the execution engine
/// or awaited inline.
pub trait WorkUnit: Send + Sync + 'static {
    fn process(&self) -> WorkFuture;
}

impl<F> WorkUnit for F
where
    F: Fn() -> WorkFuture + Send + Sync + 'static,
{
    fn process(&self) -> WorkFuture {
        self()
    }
}

/// Default delay of the placeholder process.
pub const DEFAULT_WORK_DELAY: Duration = Duration::from_secs(15);

/// Placeholder process: sleeps for `delay`, then returns a random UUID.
///
/// The sleep suspends the worker task only, never the caller that
/// submitted it.
#[derive(Debug, Clone)]
pub struct SleepingWorkUnit {
    delay: Duration,
}

impl SleepingWorkUnit {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SleepingWorkUnit {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_DELAY)
    }
}

impl WorkUnit for SleepingWorkUnit {
    fn process(&self) -> WorkFuture {
        let delay = self.delay;
        async move {
            let token = uuid::Uuid::new_v4().to_string();
            tracing::info!(
                %token,
                delay_ms = delay.as_millis() as u64,
                "Process started, sleeping before returning",
            );
            tokio::time::sleep(delay).await;
            tracing::info!(%token, "Process returning result");
            Ok(token)
        }
        .boxed()
    }
}
