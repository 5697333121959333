//! Rental and return endpoints

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use game_rental_server::models::{Customer, Game, ObjectId, Rental};

use crate::common::TestApp;

struct Fixture {
    app: TestApp,
    token: String,
    customer: Value,
    game: Value,
}

async fn fixture(stock: i32) -> Fixture {
    let app = TestApp::new();
    let token = app.token().await;
    let console = app.console("Sony Playstation").await;
    let genre = app.genre(&token, "Action").await;
    let game = app.game("Crash Bandicoot", &console, &genre, stock).await;
    let customer = app.customer(&token, "Alice Smith").await;
    Fixture { app, token, customer, game }
}

impl Fixture {
    fn pair(&self) -> Value {
        json!({ "customerId": self.customer["_id"], "gameId": self.game["_id"] })
    }

    async fn rent(&self) -> (StatusCode, Value) {
        let res = self.app.post("/api/rentals", self.pair(), Some(&self.token)).await;
        (res.status, res.body)
    }

    async fn give_back(&self) -> (StatusCode, Value) {
        let res = self.app.post("/api/returns", self.pair(), Some(&self.token)).await;
        (res.status, res.body)
    }

    async fn stock(&self) -> i64 {
        let res = self
            .app
            .get(&format!("/api/games/{}", self.game["_id"].as_str().unwrap()))
            .await;
        res.body["numberInStock"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn test_rental_requires_token() {
    let f = fixture(1).await;
    let res = f.app.post("/api/rentals", f.pair(), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(f.stock().await, 1);
}

#[tokio::test]
async fn test_rental_decrements_stock() {
    let f = fixture(2).await;
    let (status, rental) = f.rent().await;
    assert_eq!(status, StatusCode::OK, "{:?}", rental);
    assert_eq!(rental["customer"]["name"], "Alice Smith");
    assert_eq!(rental["customer"]["phone"], "555-0100");
    assert_eq!(rental["game"]["title"], "Crash Bandicoot");
    assert_eq!(rental["game"]["dailyRentalRate"], 2);
    assert!(rental["dateOut"].is_string());
    assert!(rental["dateReturned"].is_null());
    assert!(rental["rentalFee"].is_null());
    assert_eq!(f.stock().await, 1);

    let res = f.app.get(&format!("/api/rentals/{}", rental["_id"].as_str().unwrap())).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, rental);

    let res = f.app.get("/api/rentals").await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rental_out_of_stock() {
    let f = fixture(0).await;
    let (status, body) = f.rent().await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Game not in stock.");
    assert_eq!(f.stock().await, 0);
    assert!(f.app.get("/api/rentals").await.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rental_bad_input() {
    let f = fixture(1).await;

    let res = f
        .app
        .post("/api/rentals", json!({ "customerId": f.customer["_id"] }), Some(&f.token))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = f
        .app
        .post(
            "/api/rentals",
            json!({ "customerId": ObjectId::new().to_hex(), "gameId": f.game["_id"] }),
            Some(&f.token),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Invalid customer.");
    assert_eq!(f.stock().await, 1);
}

#[tokio::test]
async fn test_concurrent_rentals_of_last_copy() {
    let f = fixture(1).await;
    let ((a, _), (b, _)) = tokio::join!(f.rent(), f.rent());

    let successes = [a, b].iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(successes, 1);
    assert!(a == StatusCode::BAD_REQUEST || b == StatusCode::BAD_REQUEST);
    assert_eq!(f.stock().await, 0);
}

#[tokio::test]
async fn test_same_day_return() {
    let f = fixture(1).await;
    f.rent().await;
    assert_eq!(f.stock().await, 0);

    let (status, rental) = f.give_back().await;
    assert_eq!(status, StatusCode::OK, "{:?}", rental);
    assert!(rental["dateReturned"].is_string());
    assert_eq!(rental["rentalFee"], 0);
    assert_eq!(f.stock().await, 1);
}

#[tokio::test]
async fn test_return_charges_whole_days() {
    let f = fixture(1).await;
    let customer: Customer = serde_json::from_value(f.customer.clone()).unwrap();
    let game: Game = serde_json::from_value(f.game.clone()).unwrap();

    // Opened 7 days and a few hours ago
    let rental = Rental::open(&customer, &game, Utc::now() - Duration::days(7) - Duration::hours(3));
    f.app.repository.rentals_open(&rental).await.unwrap();

    let (status, body) = f.give_back().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], rental.id.to_hex());
    assert_eq!(body["rentalFee"], 14);
    assert_eq!(f.stock().await, 1);
}

#[tokio::test]
async fn test_second_return_rejected() {
    let f = fixture(1).await;
    f.rent().await;
    let (_, first) = f.give_back().await;

    let (status, body) = f.give_back().await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Return already processed.");
    assert_eq!(f.stock().await, 1);

    let res = f.app.get(&format!("/api/rentals/{}", first["_id"].as_str().unwrap())).await;
    assert_eq!(res.body, first);
}

#[tokio::test]
async fn test_return_without_rental() {
    let f = fixture(1).await;
    let (status, body) = f.give_back().await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Rental not found.");

    let res = f.app.post("/api/returns", f.pair(), None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_snapshots_survive_source_changes() {
    let f = fixture(1).await;
    let (_, rental) = f.rent().await;

    let uri = format!("/api/customers/{}", f.customer["_id"].as_str().unwrap());
    f.app
        .request(
            Method::PUT,
            &uri,
            Some(json!({ "name": "Alice Jones", "phone": "555-0199", "isGold": true })),
            Some(&f.token),
        )
        .await;

    let res = f.app.get(&format!("/api/rentals/{}", rental["_id"].as_str().unwrap())).await;
    assert_eq!(res.body["customer"]["name"], "Alice Smith");
}
