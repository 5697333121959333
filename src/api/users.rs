//! User registration and login endpoints

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        user::{LoginRequest, RegisterUser},
        UserInfo,
    },
};

use super::{AuthenticatedUser, ValidatedJson, AUTH_HEADER};

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserInfo,
}

/// Register a new user
///
/// The credential is returned in the `x-auth-token` response header.
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "User registered", body = UserInfo,
            headers(("x-auth-token" = String, description = "Credential for the new user"))),
        (status = 400, description = "Invalid input or email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<RegisterUser>,
) -> AppResult<impl IntoResponse> {
    let (user, token) = state.services.users.register(&data).await?;
    Ok(([(AUTH_HEADER, token)], Json(user)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse,
            headers(("x-auth-token" = String, description = "Credential"))),
        (status = 400, description = "Invalid email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    ValidatedJson(data): ValidatedJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (token, user) = state.services.users.login(&data).await?;
    let body = LoginResponse {
        token: token.clone(),
        token_type: "Bearer".to_string(),
        user,
    };
    Ok(([(AUTH_HEADER, token)], Json(body)))
}

/// Get current user profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("x_auth_token" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "No token provided", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.users.me(claims.user_id).await?;
    Ok(Json(user))
}
