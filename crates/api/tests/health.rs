//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, post};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let (app, _registry) = common::build_test_app(common::sleeping(0, "x"));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["tracked_jobs"], 0);
    assert_eq!(json["busy_workers"], 0);
}

// ---------------------------------------------------------------------------
// Test: tracked_jobs reflects submissions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_counts_tracked_jobs() {
    let (app, _registry) = common::build_test_app(common::sleeping(5_000, "slow"));

    post(app.clone(), "/longPolling").await;
    post(app.clone(), "/longPolling").await;

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["tracked_jobs"], 2);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _registry) = common::build_test_app(common::sleeping(0, "x"));
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let (app, _registry) = common::build_test_app(common::sleeping(0, "x"));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.unwrap().to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID string");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let (app, _registry) = common::build_test_app(common::sleeping(0, "x"));

    // CORS preflight requires custom headers, so we build the request manually.
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/longPolling")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let allow_origin = response
        .headers()
        .get("access-control-allow-origin")
        .expect("Missing access-control-allow-origin header");
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = response
        .headers()
        .get("access-control-allow-methods")
        .expect("Missing access-control-allow-methods header")
        .to_str()
        .unwrap();
    assert!(allow_methods.contains("POST"));
}
