#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use futures::FutureExt;
use http_body_util::BodyExt;
use longpoll_core::{ExecutionEngine, JobRegistry, WorkFuture, WorkUnit, WorkUnitError};
use tower::ServiceExt;

use longpoll_api::config::ServerConfig;
use longpoll_api::router::build_app_router;
use longpoll_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a 500 ms poll timeout so "still running" answers come back fast.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        poll_timeout_ms: 500,
        work_unit_delay_ms: 0,
        max_workers: 16,
        job_retention_secs: 3_600,
        retention_sweep_secs: 60,
    }
}

/// Build the full application router around `work`, returning the registry
/// as well so tests can inspect it directly.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(work: Arc<dyn WorkUnit>) -> (Router, Arc<JobRegistry>) {
    let config = test_config();
    let registry = Arc::new(JobRegistry::new(
        ExecutionEngine::new(config.max_workers),
        config.poll_timeout(),
    ));

    let state = AppState {
        config: Arc::new(config.clone()),
        registry: Arc::clone(&registry),
        work,
    };

    (build_app_router(state, &config), registry)
}

/// Work unit that sleeps `delay_ms`, then returns `value`.
pub fn sleeping(delay_ms: u64, value: &str) -> Arc<dyn WorkUnit> {
    let value = value.to_string();
    Arc::new(move || -> WorkFuture {
        let value = value.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok(value)
        }
        .boxed()
    })
}

/// Work unit that fails immediately.
pub fn failing() -> Arc<dyn WorkUnit> {
    Arc::new(|| -> WorkFuture {
        async { Err(WorkUnitError::Failed("work unit refused".into())) }.boxed()
    })
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri).await
}

pub async fn body_bytes(response: Response) -> axum::body::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await.to_vec()).unwrap()
}

/// `Location` header of a redirect response.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}
