//! Shared query parameter types for API handlers.

use std::time::Duration;

use serde::Deserialize;

/// Optional `?wait_ms=` override for status requests.
///
/// Lets a client ask for a shorter bounded wait than the server default.
/// Never lengthens it.
#[derive(Debug, Default, Deserialize)]
pub struct PollParams {
    pub wait_ms: Option<u64>,
}

impl PollParams {
    /// Effective wait, clamped to `max`.
    pub fn wait(&self, max: Duration) -> Duration {
        self.wait_ms
            .map(Duration::from_millis)
            .map_or(max, |requested| requested.min(max))
    }
}
