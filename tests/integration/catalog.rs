//! Consoles, genres and health endpoints

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_and_readiness() {
    let app = TestApp::new();
    let res = app.get("/api/health").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "healthy");

    let res = app.get("/api/ready").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ready");
}

#[tokio::test]
async fn test_console_name_is_normalized() {
    let app = TestApp::new();
    let console = app.console("  super   nintendo ").await;
    assert_eq!(console["name"], "Super Nintendo");
    assert_eq!(console["_id"].as_str().unwrap().len(), 24);

    let res = app.get("/api/consoles").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_console_outside_allowed_set_rejected() {
    let app = TestApp::new();
    let res = app.post("/api/consoles", json!({ "name": "Toaster 3000" }), None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "BadValue");
}

#[tokio::test]
async fn test_duplicate_console_rejected() {
    let app = TestApp::new();
    app.console("Sony Playstation").await;
    let res = app.post("/api/consoles", json!({ "name": "SONY PLAYSTATION" }), None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Console already exists.");
}

#[tokio::test]
async fn test_console_lookup_by_id() {
    let app = TestApp::new();
    let console = app.console("Sega Mega Drive").await;
    let id = console["_id"].as_str().unwrap();

    let res = app.get(&format!("/api/consoles/{}", id)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, console);

    // Malformed id
    let res = app.get("/api/consoles/123").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Invalid Object ID.");

    // Well-formed but absent
    let res = app.get("/api/consoles/5f1d7a3b9c1e4a0012345678").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_console_update_and_delete() {
    let app = TestApp::new();
    let console = app.console("Nintendo 64").await;
    let uri = format!("/api/consoles/{}", console["_id"].as_str().unwrap());

    let res = app
        .request(Method::PUT, &uri, Some(json!({ "name": "nintendo switch" })), None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Nintendo Switch");

    let res = app.request(Method::DELETE, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Nintendo Switch");

    let res = app.request(Method::DELETE, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_genre_create_requires_token() {
    let app = TestApp::new();
    let res = app.post("/api/genres", json!({ "name": "Action" }), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.post("/api/genres", json!({ "name": "Action" }), Some("not-a-token")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Invalid token.");

    let token = app.token().await;
    let genre = app.genre(&token, "role-playing").await;
    assert_eq!(genre["name"], "Role-playing");
}

#[tokio::test]
async fn test_bearer_header_accepted() {
    let app = TestApp::new();
    let token = app.token().await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/genres")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"name":"Strategy"}"#))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
