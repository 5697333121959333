//! Console API endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{catalog::CatalogNameInput, Console},
};

use super::{IdPath, ValidatedJson};

/// List all consoles
#[utoipa::path(
    get,
    path = "/consoles",
    tag = "consoles",
    responses(
        (status = 200, description = "Console list", body = Vec<Console>)
    )
)]
pub async fn list_consoles(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Console>>> {
    let consoles = state.services.catalog.list_consoles().await?;
    Ok(Json(consoles))
}

/// Get console by ID
#[utoipa::path(
    get,
    path = "/consoles/{id}",
    tag = "consoles",
    params(("id" = String, Path, description = "Console ID")),
    responses(
        (status = 200, description = "Console details", body = Console),
        (status = 400, description = "Console not found", body = crate::error::ErrorResponse),
        (status = 404, description = "Malformed ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_console(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Console>> {
    let console = state.services.catalog.get_console(id).await?;
    Ok(Json(console))
}

/// Create a console
#[utoipa::path(
    post,
    path = "/consoles",
    tag = "consoles",
    request_body = CatalogNameInput,
    responses(
        (status = 200, description = "Console created", body = Console),
        (status = 400, description = "Invalid or duplicate name", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_console(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<CatalogNameInput>,
) -> AppResult<Json<Console>> {
    let console = state.services.catalog.create_console(&data).await?;
    Ok(Json(console))
}

/// Rename a console
#[utoipa::path(
    put,
    path = "/consoles/{id}",
    tag = "consoles",
    params(("id" = String, Path, description = "Console ID")),
    request_body = CatalogNameInput,
    responses(
        (status = 200, description = "Console updated", body = Console)
    )
)]
pub async fn update_console(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
    ValidatedJson(data): ValidatedJson<CatalogNameInput>,
) -> AppResult<Json<Console>> {
    let console = state.services.catalog.rename_console(id, &data).await?;
    Ok(Json(console))
}

/// Delete a console
#[utoipa::path(
    delete,
    path = "/consoles/{id}",
    tag = "consoles",
    params(("id" = String, Path, description = "Console ID")),
    responses(
        (status = 200, description = "Deleted console", body = Console)
    )
)]
pub async fn delete_console(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Console>> {
    let console = state.services.catalog.delete_console(id).await?;
    Ok(Json(console))
}
