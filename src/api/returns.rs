//! Return processing endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{rental::RentalRequest, Rental},
};

use super::{AuthenticatedUser, ValidatedJson};

/// Return a rented game
///
/// Closes the open rental for the customer and game, charges the fee and
/// puts the copy back in stock.
#[utoipa::path(
    post,
    path = "/returns",
    tag = "rentals",
    security(("x_auth_token" = [])),
    request_body = RentalRequest,
    responses(
        (status = 200, description = "Rental closed", body = Rental),
        (status = 400, description = "Return already processed", body = crate::error::ErrorResponse),
        (status = 404, description = "Rental not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn process_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<RentalRequest>,
) -> AppResult<Json<Rental>> {
    let rental = state.services.rentals.process_return(&data).await?;
    Ok(Json(rental))
}
