//! Rental API endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{rental::RentalRequest, Rental},
};

use super::{AuthenticatedUser, IdPath, ValidatedJson};

/// List rentals, most recent first
#[utoipa::path(
    get,
    path = "/rentals",
    tag = "rentals",
    responses(
        (status = 200, description = "Rental list", body = Vec<Rental>)
    )
)]
pub async fn list_rentals(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Rental>>> {
    let rentals = state.services.rentals.list().await?;
    Ok(Json(rentals))
}

/// Get rental by ID
#[utoipa::path(
    get,
    path = "/rentals/{id}",
    tag = "rentals",
    params(("id" = String, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental details", body = Rental)
    )
)]
pub async fn get_rental(State(state): State<crate::AppState>, IdPath(id): IdPath) -> AppResult<Json<Rental>> {
    let rental = state.services.rentals.get_by_id(id).await?;
    Ok(Json(rental))
}

/// Rent a game to a customer
#[utoipa::path(
    post,
    path = "/rentals",
    tag = "rentals",
    security(("x_auth_token" = [])),
    request_body = RentalRequest,
    responses(
        (status = 200, description = "Rental opened", body = Rental),
        (status = 400, description = "Unknown customer or game, or game not in stock", body = crate::error::ErrorResponse),
        (status = 401, description = "No token provided", body = crate::error::ErrorResponse),
        (status = 500, description = "Rental transaction failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<RentalRequest>,
) -> AppResult<Json<Rental>> {
    let rental = state.services.rentals.create_rental(&data).await?;
    Ok(Json(rental))
}
