//! Periodic eviction of finished and failed jobs.
//!
//! Without this the registry would keep every job for the life of the
//! process. Jobs whose outcome is older than the retention period are
//! dropped; polling them afterwards yields 404. Jobs still running are
//! never evicted.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use longpoll_core::JobRegistry;
use tokio_util::sync::CancellationToken;

/// Evict every job whose outcome is older than `retention_secs`.
///
/// Returns the number of evicted jobs.
pub async fn sweep(registry: &JobRegistry, retention_secs: u64) -> usize {
    let cutoff = i64::try_from(retention_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|retention| Utc::now().checked_sub_signed(retention));

    match cutoff {
        Some(cutoff) => registry.evict_completed_before(cutoff).await,
        // Retention longer than the representable past: nothing can expire.
        None => 0,
    }
}

/// Run the retention loop until `cancel` is triggered.
pub async fn run(
    registry: Arc<JobRegistry>,
    retention_secs: u64,
    sweep_interval: Duration,
    cancel: CancellationToken,
) {
    tracing::info!(
        retention_secs,
        interval_secs = sweep_interval.as_secs(),
        "Job retention task started"
    );

    let mut interval = tokio::time::interval(sweep_interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Job retention task stopping");
                break;
            }
            _ = interval.tick() => {
                let evicted = sweep(&registry, retention_secs).await;
                if evicted > 0 {
                    tracing::info!(evicted, "Job retention: evicted expired jobs");
                } else {
                    tracing::debug!("Job retention: nothing to evict");
                }
            }
        }
    }
}
