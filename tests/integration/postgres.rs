//! Tests against a PostgreSQL store
//!
//! Needs a reachable database. Run with:
//! DATABASE_URL=postgres://... cargo test postgres -- --ignored

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

use game_rental_server::{
    config::DatabaseConfig,
    models::{rental::RentalRequest, CatalogSnapshot, Customer, Game, ObjectId, Rental},
    repository::{to_document, Collection, Document, DocumentStore, Guard, PgStore, Repository, StoreError, WriteOp},
    services::rentals::RentalsService,
    AppError,
};

async fn store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let store = PgStore::connect(&DatabaseConfig {
        url,
        ..DatabaseConfig::default()
    })
    .await
    .expect("Failed to connect to PostgreSQL");
    store.migrate().await.expect("Failed to run migrations");
    store
}

fn doc(value: Value) -> Document {
    value.as_object().cloned().expect("object")
}

fn customer() -> Customer {
    Customer {
        id: ObjectId::new(),
        name: "Postgres Tester".to_string(),
        phone: "555-0199".to_string(),
        is_gold: false,
    }
}

fn game(stock: i32) -> Game {
    Game {
        id: ObjectId::new(),
        title: "Secret Of Mana".to_string(),
        console: CatalogSnapshot { id: ObjectId::new(), name: "Super Nintendo".to_string() },
        genre: CatalogSnapshot { id: ObjectId::new(), name: "Role-playing".to_string() },
        number_in_stock: stock,
        daily_rental_rate: 2,
    }
}

async fn seeded(stock: i32) -> (Repository, Customer, Game) {
    let repository = Repository::new(Arc::new(store().await));
    let customer = customer();
    let game = game(stock);
    repository.customers_create(&customer).await.unwrap();
    repository.games_create(&game).await.unwrap();
    (repository, customer, game)
}

async fn stock(repository: &Repository, id: ObjectId) -> i32 {
    repository.games_get_by_id(id).await.unwrap().unwrap().number_in_stock
}

#[tokio::test]
#[ignore]
async fn test_pg_failed_guard_rolls_back_insert() {
    let (repository, customer, game) = seeded(0).await;
    let rental = Rental::open(&customer, &game, Utc::now());

    let err = repository.rentals_open(&rental).await.unwrap_err();
    assert!(matches!(err, StoreError::GuardFailed { collection: Collection::Games, .. }));
    assert!(repository.rentals_get_by_id(rental.id).await.unwrap().is_none());
    assert_eq!(stock(&repository, game.id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_pg_missing_document_is_not_a_guard_failure() {
    let store = store().await;
    let id = ObjectId::new();
    let op = WriteOp::Increment {
        collection: Collection::Games,
        id,
        field: "numberInStock".to_string(),
        by: -1,
        guard: Some(Guard::AtLeast("numberInStock".to_string(), 0)),
    };

    let err = store.atomic_unit(vec![op]).await.unwrap_err();
    assert!(matches!(err, StoreError::Missing { collection: Collection::Games, id: missing } if missing == id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_pg_concurrent_rentals_of_last_copy() {
    let (repository, customer, game) = seeded(1).await;
    let rentals = RentalsService::new(repository.clone());
    let request = RentalRequest { customer_id: customer.id, game_id: game.id };

    let (first, second) = tokio::join!(rentals.create_rental(&request), rentals.create_rental(&request));
    let outcomes = [first, second];

    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes.iter().any(|r| matches!(r, Err(AppError::OutOfStock(_)))));
    assert_eq!(stock(&repository, game.id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_pg_second_close_fails_guard_and_restocks_once() {
    let (repository, customer, game) = seeded(1).await;
    let mut rental = Rental::open(&customer, &game, Utc::now() - Duration::days(3));
    repository.rentals_open(&rental).await.unwrap();
    rental.close(Utc::now());

    repository.rentals_close(&rental, true).await.unwrap();
    let err = repository.rentals_close(&rental, true).await.unwrap_err();

    assert!(matches!(err, StoreError::GuardFailed { collection: Collection::Rentals, .. }));
    assert_eq!(stock(&repository, game.id).await, 1);
    let stored = repository.rentals_get_by_id(rental.id).await.unwrap().unwrap();
    assert_eq!(stored.rental_fee, Some(6));
}

#[tokio::test]
#[ignore]
async fn test_pg_null_guard_accepts_absent_field() {
    let store = store().await;
    let id = ObjectId::new();
    store
        .insert(Collection::Rentals, doc(json!({ "_id": id.to_hex(), "rentalFee": null })))
        .await
        .unwrap();

    let op = WriteOp::Update {
        collection: Collection::Rentals,
        id,
        set: doc(json!({ "dateReturned": "2024-01-02T00:00:00.000000000Z", "rentalFee": 2 })),
        guard: Some(Guard::IsNull("dateReturned".to_string())),
    };
    store.atomic_unit(vec![op]).await.unwrap();

    let stored = store.find_by_id(Collection::Rentals, id).await.unwrap().unwrap();
    assert_eq!(stored["rentalFee"], 2);
}

#[tokio::test]
#[ignore]
async fn test_pg_restock_stops_at_maximum() {
    let (repository, customer, game) = seeded(1).await;
    let mut rental = Rental::open(&customer, &game, Utc::now());
    repository.rentals_open(&rental).await.unwrap();
    repository
        .games_update(game.id, to_document(&json!({ "numberInStock": 255 })).unwrap())
        .await
        .unwrap();
    rental.close(Utc::now());

    let err = repository.rentals_close(&rental, true).await.unwrap_err();
    assert!(matches!(err, StoreError::GuardFailed { collection: Collection::Games, .. }));
    assert!(!repository.rentals_get_by_id(rental.id).await.unwrap().unwrap().is_returned());
    assert_eq!(stock(&repository, game.id).await, 255);
}

#[tokio::test]
#[ignore]
async fn test_pg_newest_open_rental_wins_within_one_second() {
    let (repository, customer, game) = seeded(2).await;
    let second = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let older = Rental::open(&customer, &game, second);
    let newer = Rental::open(&customer, &game, second + Duration::milliseconds(500));
    repository.rentals_open(&older).await.unwrap();
    repository.rentals_open(&newer).await.unwrap();

    let picked = repository
        .rentals_find_by_customer_and_game(customer.id, game.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(picked.id, newer.id);
}

#[tokio::test]
#[ignore]
async fn test_pg_unique_name_is_duplicate() {
    let store = store().await;
    let name = format!("Genre {}", ObjectId::new());
    store
        .insert(Collection::Genres, doc(json!({ "_id": ObjectId::new().to_hex(), "name": name })))
        .await
        .unwrap();

    let err = store
        .insert(Collection::Genres, doc(json!({ "_id": ObjectId::new().to_hex(), "name": name })))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { ref field, .. } if field == "name"));
}
