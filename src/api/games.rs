//! Game API endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        game::{CreateGame, GameQuery, UpdateGame},
        Game,
    },
};

use super::{IdPath, ValidatedJson};

/// List games sorted by genre name
#[utoipa::path(
    get,
    path = "/games",
    tag = "games",
    params(GameQuery),
    responses(
        (status = 200, description = "Game list", body = Vec<Game>)
    )
)]
pub async fn list_games(
    State(state): State<crate::AppState>,
    Query(query): Query<GameQuery>,
) -> AppResult<Json<Vec<Game>>> {
    let games = state.services.games.list(&query).await?;
    Ok(Json(games))
}

/// Get game by ID
#[utoipa::path(
    get,
    path = "/games/{id}",
    tag = "games",
    params(("id" = String, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Game details", body = Game),
        (status = 400, description = "Game not found", body = crate::error::ErrorResponse),
        (status = 404, description = "Malformed ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_game(State(state): State<crate::AppState>, IdPath(id): IdPath) -> AppResult<Json<Game>> {
    let game = state.services.games.get_by_id(id).await?;
    Ok(Json(game))
}

/// Create a game
#[utoipa::path(
    post,
    path = "/games",
    tag = "games",
    request_body = CreateGame,
    responses(
        (status = 200, description = "Game created", body = Game),
        (status = 400, description = "Invalid input or unknown console/genre", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_game(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CreateGame>,
) -> AppResult<Json<Game>> {
    let game = state.services.games.create(&data).await?;
    Ok(Json(game))
}

/// Update a game
#[utoipa::path(
    put,
    path = "/games/{id}",
    tag = "games",
    params(("id" = String, Path, description = "Game ID")),
    request_body = UpdateGame,
    responses(
        (status = 200, description = "Game updated", body = Game)
    )
)]
pub async fn update_game(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
    ValidatedJson(data): ValidatedJson<UpdateGame>,
) -> AppResult<Json<Game>> {
    let game = state.services.games.update(id, &data).await?;
    Ok(Json(game))
}

/// Delete a game
#[utoipa::path(
    delete,
    path = "/games/{id}",
    tag = "games",
    params(("id" = String, Path, description = "Game ID")),
    responses(
        (status = 200, description = "Deleted game", body = Game)
    )
)]
pub async fn delete_game(State(state): State<crate::AppState>, IdPath(id): IdPath) -> AppResult<Json<Game>> {
    let game = state.services.games.delete(id).await?;
    Ok(Json(game))
}
