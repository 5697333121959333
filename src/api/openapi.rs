//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{consoles, customers, games, genres, health, rentals, returns, users};

/// Registers the `x-auth-token` header scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "x_auth_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "x-auth-token",
                    "Credential returned by POST /api/users/register and /api/users/login",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Game Rental API",
        version = "1.0.0",
        description = "Video game rental inventory REST API"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Consoles
        consoles::list_consoles,
        consoles::get_console,
        consoles::create_console,
        consoles::update_console,
        consoles::delete_console,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Games
        games::list_games,
        games::get_game,
        games::create_game,
        games::update_game,
        games::delete_game,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        // Users
        users::register,
        users::login,
        users::me,
        // Rentals
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        returns::process_return,
    ),
    components(
        schemas(
            // Catalog
            crate::models::Console,
            crate::models::Genre,
            crate::models::CatalogSnapshot,
            crate::models::catalog::CatalogNameInput,
            // Games
            crate::models::Game,
            crate::models::game::CreateGame,
            crate::models::game::UpdateGame,
            // Customers
            crate::models::Customer,
            crate::models::customer::CustomerInput,
            // Users
            crate::models::UserInfo,
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            users::LoginResponse,
            // Rentals
            crate::models::Rental,
            crate::models::CustomerSnapshot,
            crate::models::GameSnapshot,
            crate::models::rental::RentalRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "consoles", description = "Console reference data"),
        (name = "genres", description = "Genre reference data"),
        (name = "games", description = "Game inventory"),
        (name = "customers", description = "Customer management"),
        (name = "users", description = "Registration and login"),
        (name = "rentals", description = "Rentals and returns")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
