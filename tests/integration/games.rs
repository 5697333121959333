//! Game inventory endpoints

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::TestApp;

async fn catalog(app: &TestApp) -> (Value, Value, Value, Value) {
    let token = app.token().await;
    let snes = app.console("Super Nintendo").await;
    let sega = app.console("Sega Mega Drive").await;
    let action = app.genre(&token, "Action").await;
    let rpg = app.genre(&token, "Role-playing").await;
    (snes, sega, action, rpg)
}

#[tokio::test]
async fn test_create_game_embeds_snapshots() {
    let app = TestApp::new();
    let (snes, _, action, _) = catalog(&app).await;

    let game = app.game("Super Mario World", &snes, &action, 3).await;
    assert_eq!(game["console"], snes);
    assert_eq!(game["genre"], action);
    assert_eq!(game["numberInStock"], 3);
    assert_eq!(game["dailyRentalRate"], 2);

    let res = app.get(&format!("/api/games/{}", game["_id"].as_str().unwrap())).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, game);
}

#[tokio::test]
async fn test_create_game_validation() {
    let app = TestApp::new();
    let (snes, _, action, _) = catalog(&app).await;

    // Title too short
    let res = app
        .post(
            "/api/games",
            json!({ "title": "Mar", "consoleId": snes["_id"], "genreId": action["_id"], "numberInStock": 1, "dailyRentalRate": 1 }),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    // Stock out of range
    let res = app
        .post(
            "/api/games",
            json!({ "title": "Super Mario World", "consoleId": snes["_id"], "genreId": action["_id"], "numberInStock": 300, "dailyRentalRate": 1 }),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    // Unknown console
    let res = app
        .post(
            "/api/games",
            json!({ "title": "Super Mario World", "consoleId": "5f1d7a3b9c1e4a0012345678", "genreId": action["_id"], "numberInStock": 1, "dailyRentalRate": 1 }),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Console with the given id does not exist.");

    // Malformed id in the body
    let res = app
        .post(
            "/api/games",
            json!({ "title": "Super Mario World", "consoleId": "1", "genreId": action["_id"], "numberInStock": 1, "dailyRentalRate": 1 }),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_sorted_by_genre_and_filtered() {
    let app = TestApp::new();
    let (snes, sega, action, rpg) = catalog(&app).await;
    app.game("Chrono Trigger", &snes, &rpg, 1).await;
    app.game("Super Mario World", &snes, &action, 1).await;
    app.game("Sonic The Hedgehog", &sega, &action, 1).await;

    let res = app.get("/api/games").await;
    assert_eq!(res.status, StatusCode::OK);
    let genres: Vec<_> = res.body.as_array().unwrap().iter().map(|g| g["genre"]["name"].clone()).collect();
    assert_eq!(genres, vec![json!("Action"), json!("Action"), json!("Role-playing")]);

    let res = app.get("/api/games?console=Super%20Nintendo").await;
    let titles: Vec<_> = res.body.as_array().unwrap().iter().map(|g| g["title"].clone()).collect();
    assert_eq!(titles, vec![json!("Super Mario World"), json!("Chrono Trigger")]);

    let res = app.get("/api/games?console=Super%20Nintendo&genre=Role-playing").await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_game_id_handling() {
    let app = TestApp::new();
    let res = app.get("/api/games/1").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.get("/api/games/5f1d7a3b9c1e4a0012345678").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_changes_only_given_snapshot() {
    let app = TestApp::new();
    let (snes, sega, action, _) = catalog(&app).await;
    let game = app.game("Super Mario World", &snes, &action, 1).await;
    let uri = format!("/api/games/{}", game["_id"].as_str().unwrap());

    let res = app
        .request(
            Method::PUT,
            &uri,
            Some(json!({ "title": "Super Mario World", "consoleId": sega["_id"], "numberInStock": 4, "dailyRentalRate": 3 })),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
    assert_eq!(res.body["console"], sega);
    assert_eq!(res.body["genre"], action);
    assert_eq!(res.body["numberInStock"], 4);

    // Title is required on update
    let res = app
        .request(Method::PUT, &uri, Some(json!({ "numberInStock": 4, "dailyRentalRate": 3 })), None)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.request(Method::DELETE, &uri, None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(app.get(&uri).await.status, StatusCode::BAD_REQUEST);
}
