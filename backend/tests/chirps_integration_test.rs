//! Integration tests for chirp endpoints

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::{json, Value};

async fn post_chirp(app: &TestApp, token: &str, body: &str) -> Value {
    let response = app
        .with_bearer(Method::POST, "/api/chirps", token, Some(&json!({ "body": body })))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.json()
}

#[tokio::test]
async fn test_create_and_fetch_chirp() {
    let app = TestApp::new();
    let (session, _, _) = app.signed_in_user().await;
    let token = session["token"].as_str().unwrap();

    let chirp = post_chirp(&app, token, "I had something interesting for breakfast").await;
    assert_eq!(chirp["user_id"], session["id"]);

    let fetched = app.get(&format!("/api/chirps/{}", chirp["id"].as_str().unwrap())).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), chirp);
}

#[tokio::test]
async fn test_profanity_is_masked() {
    let app = TestApp::new();
    let (session, _, _) = app.signed_in_user().await;

    let chirp = post_chirp(
        &app,
        session["token"].as_str().unwrap(),
        "I really need a kerfuffle to go to bed sooner, Fornax !",
    )
    .await;
    assert_eq!(chirp["body"], "I really need a **** to go to bed sooner, **** !");
}

#[tokio::test]
async fn test_chirp_too_long_is_400() {
    let app = TestApp::new();
    let (session, _, _) = app.signed_in_user().await;

    let response = app
        .with_bearer(
            Method::POST,
            "/api/chirps",
            session["token"].as_str().unwrap(),
            Some(&json!({ "body": "x".repeat(141) })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filter_and_sort() {
    let app = TestApp::new();
    let (walt, _, _) = app.signed_in_user().await;
    let (jesse, _, _) = app.signed_in_user().await;

    post_chirp(&app, walt["token"].as_str().unwrap(), "one").await;
    post_chirp(&app, jesse["token"].as_str().unwrap(), "two").await;
    post_chirp(&app, walt["token"].as_str().unwrap(), "three").await;

    let all = app.get("/api/chirps").await.json();
    assert_eq!(all.as_array().unwrap().len(), 3);

    let desc = app.get("/api/chirps?sort=desc").await.json();
    assert_eq!(desc[0]["body"], "three");
    assert_eq!(desc[2]["body"], "one");

    let walts = app
        .get(&format!("/api/chirps?author_id={}", walt["id"].as_str().unwrap()))
        .await
        .json();
    let bodies: Vec<_> = walts
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["one", "three"]);

    assert_eq!(
        app.get("/api/chirps?author_id=nope").await.status,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        app.get("/api/chirps?sort=sideways").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_delete_by_non_owner_is_403() {
    let app = TestApp::new();
    let (walt, _, _) = app.signed_in_user().await;
    let (jesse, _, _) = app.signed_in_user().await;

    let chirp = post_chirp(&app, walt["token"].as_str().unwrap(), "mine").await;
    let path = format!("/api/chirps/{}", chirp["id"].as_str().unwrap());

    let response = app
        .with_bearer(Method::DELETE, &path, jesse["token"].as_str().unwrap(), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get(&path).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_by_owner_then_get_is_404() {
    let app = TestApp::new();
    let (walt, _, _) = app.signed_in_user().await;
    let token = walt["token"].as_str().unwrap();

    let chirp = post_chirp(&app, token, "short-lived").await;
    let path = format!("/api/chirps/{}", chirp["id"].as_str().unwrap());

    let response = app.with_bearer(Method::DELETE, &path, token, None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get(&path).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_chirp_is_404() {
    let app = TestApp::new();
    let (walt, _, _) = app.signed_in_user().await;

    let response = app
        .with_bearer(
            Method::DELETE,
            &format!("/api/chirps/{}", uuid::Uuid::new_v4()),
            walt["token"].as_str().unwrap(),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
