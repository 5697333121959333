//! Customer endpoints

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_customer_writes_require_token() {
    let app = TestApp::new();
    let res = app
        .post("/api/customers", json!({ "name": "Alice Smith", "phone": "555-0100" }), None)
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_customer_crud() {
    let app = TestApp::new();
    let token = app.token().await;

    let customer = app.customer(&token, "Alice Smith").await;
    assert_eq!(customer["isGold"], false);
    let uri = format!("/api/customers/{}", customer["_id"].as_str().unwrap());

    let res = app.get(&uri).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, customer);

    let res = app
        .request(
            Method::PUT,
            &uri,
            Some(json!({ "name": "Alice Jones", "phone": "555-0199", "isGold": true })),
            Some(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Alice Jones");
    assert_eq!(res.body["isGold"], true);

    let res = app.request(Method::DELETE, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.get(&uri).await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customer_validation() {
    let app = TestApp::new();
    let token = app.token().await;
    let res = app
        .post("/api/customers", json!({ "name": "Al", "phone": "555-0100" }), Some(&token))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customers_listed_by_name() {
    let app = TestApp::new();
    let token = app.token().await;
    app.customer(&token, "Zelda Hyrule").await;
    app.customer(&token, "Alice Smith").await;

    let res = app.get("/api/customers").await;
    let names: Vec<_> = res.body.as_array().unwrap().iter().map(|c| c["name"].clone()).collect();
    assert_eq!(names, vec![json!("Alice Smith"), json!("Zelda Hyrule")]);
}
