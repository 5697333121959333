//! Customer API endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{customer::CustomerInput, Customer},
};

use super::{AuthenticatedUser, IdPath, ValidatedJson};

/// List customers sorted by name
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    responses(
        (status = 200, description = "Customer list", body = Vec<Customer>)
    )
)]
pub async fn list_customers(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = state.services.customers.list().await?;
    Ok(Json(customers))
}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = Customer)
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_by_id(id).await?;
    Ok(Json(customer))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    security(("x_auth_token" = [])),
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Customer created", body = Customer)
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    ValidatedJson(data): ValidatedJson<CustomerInput>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.create(&data).await?;
    Ok(Json(customer))
}

/// Update a customer
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    security(("x_auth_token" = [])),
    params(("id" = String, Path, description = "Customer ID")),
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Customer updated", body = Customer)
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
    ValidatedJson(data): ValidatedJson<CustomerInput>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.update(id, &data).await?;
    Ok(Json(customer))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    security(("x_auth_token" = [])),
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Deleted customer", body = Customer)
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    IdPath(id): IdPath,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.delete(id).await?;
    Ok(Json(customer))
}
