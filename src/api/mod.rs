//! API handlers for the game rental REST endpoints

pub mod consoles;
pub mod customers;
pub mod games;
pub mod genres;
pub mod health;
pub mod openapi;
pub mod rentals;
pub mod returns;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, HeaderName},
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{error::AppError, models::{ObjectId, UserClaims}, AppState};

/// Header carrying the credential, both on requests and on register/login responses
pub const AUTH_HEADER: &str = "x-auth-token";

/// Extractor for the authenticated user.
///
/// Reads `x-auth-token`, falling back to `Authorization: Bearer`. A missing
/// credential is rejected with 401, an unverifiable one with 400.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTH_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| AppError::InvalidToken("Invalid token.".to_string()))?
                .to_string(),
            None => parts
                .headers
                .typed_get::<Authorization<Bearer>>()
                .map(|auth| auth.token().to_string())
                .ok_or_else(|| AppError::Unauthorized("Access denied. No token provided.".to_string()))?,
        };

        let claims = state.services.auth.verify(&token)?;
        Ok(AuthenticatedUser(claims))
    }
}

/// JSON body that is deserialized and then validated.
///
/// Any rejection (malformed JSON, missing fields, bad ids) becomes a validation error.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path identifier; a malformed ObjectId is rejected with 404
pub struct IdPath(pub ObjectId);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || AppError::InvalidObjectId("Invalid Object ID.".to_string());
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;
        raw.parse().map(IdPath).map_err(|_| invalid())
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(AUTH_HEADER)]);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Consoles
        .route("/consoles", get(consoles::list_consoles))
        .route("/consoles", post(consoles::create_console))
        .route("/consoles/:id", get(consoles::get_console))
        .route("/consoles/:id", put(consoles::update_console))
        .route("/consoles/:id", delete(consoles::delete_console))
        // Genres
        .route("/genres", get(genres::list_genres))
        .route("/genres", post(genres::create_genre))
        .route("/genres/:id", get(genres::get_genre))
        .route("/genres/:id", put(genres::update_genre))
        .route("/genres/:id", delete(genres::delete_genre))
        // Games
        .route("/games", get(games::list_games))
        .route("/games", post(games::create_game))
        .route("/games/:id", get(games::get_game))
        .route("/games/:id", put(games::update_game))
        .route("/games/:id", delete(games::delete_game))
        // Customers
        .route("/customers", get(customers::list_customers))
        .route("/customers", post(customers::create_customer))
        .route("/customers/:id", get(customers::get_customer))
        .route("/customers/:id", put(customers::update_customer))
        .route("/customers/:id", delete(customers::delete_customer))
        // Users
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::me))
        // Rentals and returns
        .route("/rentals", get(rentals::list_rentals))
        .route("/rentals", post(rentals::create_rental))
        .route("/rentals/:id", get(rentals::get_rental))
        .route("/returns", post(returns::process_return))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
