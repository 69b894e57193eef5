//! Integration tests for the payment provider webhook

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, TEST_API_KEY};
use serde_json::{json, Value};

fn upgrade_event(user_id: &str) -> Value {
    json!({ "event": "user.upgraded", "data": { "user_id": user_id } })
}

async fn send(app: &TestApp, key: Option<&str>, body: &Value) -> common::TestResponse {
    let header = key.map(|k| format!("ApiKey {}", k));
    app.request(Method::POST, "/api/polka/webhooks", header.as_deref(), Some(body))
        .await
}

#[tokio::test]
async fn test_upgrade_marks_user_red() {
    let app = TestApp::new();
    let (session, email, password) = app.signed_in_user().await;
    assert_eq!(session["is_chirpy_red"], false);

    let response = send(&app, Some(TEST_API_KEY), &upgrade_event(session["id"].as_str().unwrap())).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());

    let session = app.login(&email, &password).await;
    assert_eq!(session["is_chirpy_red"], true);
}

#[tokio::test]
async fn test_wrong_api_key_is_401() {
    let app = TestApp::new();
    let (session, _, _) = app.signed_in_user().await;
    let body = upgrade_event(session["id"].as_str().unwrap());

    assert_eq!(send(&app, Some("wrong-key"), &body).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(send(&app, None, &body).await.status, StatusCode::UNAUTHORIZED);

    // Key is checked before the payload
    let garbage = json!({ "nonsense": true });
    assert_eq!(send(&app, Some("wrong-key"), &garbage).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_event_is_ignored() {
    let app = TestApp::new();
    let (session, email, password) = app.signed_in_user().await;

    let body = json!({
        "event": "user.payment_failed",
        "data": { "user_id": session["id"] }
    });
    let response = send(&app, Some(TEST_API_KEY), &body).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let session = app.login(&email, &password).await;
    assert_eq!(session["is_chirpy_red"], false);
}

#[tokio::test]
async fn test_unknown_event_without_data_is_ignored() {
    let app = TestApp::new();

    let bare = json!({ "event": "user.payment_failed" });
    assert_eq!(send(&app, Some(TEST_API_KEY), &bare).await.status, StatusCode::NO_CONTENT);

    let empty = json!({ "event": "user.payment_failed", "data": {} });
    assert_eq!(send(&app, Some(TEST_API_KEY), &empty).await.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_upgrade_without_user_id_is_400() {
    let app = TestApp::new();

    let bare = json!({ "event": "user.upgraded" });
    assert_eq!(send(&app, Some(TEST_API_KEY), &bare).await.status, StatusCode::BAD_REQUEST);

    let empty = json!({ "event": "user.upgraded", "data": {} });
    assert_eq!(send(&app, Some(TEST_API_KEY), &empty).await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upgrade_unknown_user_is_404() {
    let app = TestApp::new();
    let response = send(
        &app,
        Some(TEST_API_KEY),
        &upgrade_event(&uuid::Uuid::new_v4().to_string()),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
