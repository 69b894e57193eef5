//! Integration tests for health and admin endpoints

mod common;

use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new();

    let response = app.get("/api/healthz").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let app = TestApp::new();

    let response = app.get("/api/healthz/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["checks"]["store"]["status"], "healthy");
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let app = TestApp::new();
    assert_eq!(app.get("/admin/metrics").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = TestApp::new();
    let response = tower::ServiceExt::oneshot(
        app.app.clone(),
        axum::http::Request::builder()
            .uri("/api/healthz")
            .header("x-request-id", "req-123")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_with_postgres() {
    let app = TestApp::with_postgres().await;

    let response = app.get("/api/healthz/ready").await;

    assert_eq!(response.status, StatusCode::OK);
}
