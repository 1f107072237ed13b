//! Integration tests for the job retention sweep.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get, post};
use longpoll_api::background::job_retention;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Test: Expired finished jobs are evicted and then read as 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sweep_evicts_finished_jobs() {
    let (app, registry) = common::build_test_app(common::sleeping(0, "done"));
    let id = body_json(post(app.clone(), "/longPolling").await).await["id"].clone();
    let uri = format!("/longPolling/{id}");
    assert_eq!(body_json(get(app.clone(), &uri).await).await["status"], "Finished");
    tokio::time::sleep(Duration::from_millis(5)).await;

    let evicted = job_retention::sweep(&registry, 0).await;

    assert_eq!(evicted, 1);
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: Running jobs survive a sweep
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sweep_keeps_running_jobs() {
    let (app, registry) = common::build_test_app(common::sleeping(10_000, "never"));
    post(app, "/longPolling").await;

    assert_eq!(job_retention::sweep(&registry, 0).await, 0);
    assert_eq!(registry.len().await, 1);
}

// ---------------------------------------------------------------------------
// Test: Recent completions are kept under the default retention
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sweep_keeps_recent_completions() {
    let (app, registry) = common::build_test_app(common::sleeping(0, "done"));
    let id = body_json(post(app.clone(), "/longPolling").await).await["id"].clone();
    get(app, &format!("/longPolling/{id}")).await;

    assert_eq!(job_retention::sweep(&registry, 3_600).await, 0);
    assert_eq!(job_retention::sweep(&registry, u64::MAX).await, 0);
    assert_eq!(registry.len().await, 1);
}

// ---------------------------------------------------------------------------
// Test: The retention loop stops on cancellation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn retention_loop_stops_on_cancel() {
    let (_app, registry) = common::build_test_app(common::sleeping(0, "x"));
    let cancel = CancellationToken::new();

    let task = tokio::spawn(job_retention::run(
        registry,
        0,
        Duration::from_millis(10),
        cancel.clone(),
    ));
    tokio::time::sleep(Duration::from_millis(30)).await;
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("retention loop did not stop")
        .unwrap();
}
