//! Genre API endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{catalog::CatalogNameInput, Genre},
};

use super::{AuthenticatedUser, IdPath, ValidatedJson};

/// List all genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genre list", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.catalog.list_genres().await?;
    Ok(Json(genres))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = String, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = Genre)
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.get_genre(id).await?;
    Ok(Json(genre))
}

/// Create a genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    security(("x_auth_token" = [])),
    request_body = CatalogNameInput,
    responses(
        (status = 200, description = "Genre created", body = Genre),
        (status = 401, description = "No token provided", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CatalogNameInput>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.create_genre(&data).await?;
    Ok(Json(genre))
}

/// Rename a genre
#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = String, Path, description = "Genre ID")),
    request_body = CatalogNameInput,
    responses(
        (status = 200, description = "Genre updated", body = Genre)
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
    ValidatedJson(data): ValidatedJson<CatalogNameInput>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.rename_genre(id, &data).await?;
    Ok(Json(genre))
}

/// Delete a genre
#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = String, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Deleted genre", body = Genre)
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Genre>> {
    let genre = state.services.catalog.delete_genre(id).await?;
    Ok(Json(genre))
}
