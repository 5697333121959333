//! Game model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{trimmed, CatalogSnapshot, ObjectId};

/// Game document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub title: String,
    pub console: CatalogSnapshot,
    pub genre: CatalogSnapshot,
    /// Copies available for rent; never negative
    pub number_in_stock: i32,
    /// Currency units charged per rental day
    pub daily_rental_rate: i32,
}

/// Create game request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGame {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 250, message = "Title must be between 5 and 250 characters"))]
    pub title: String,
    #[schema(value_type = String)]
    pub console_id: ObjectId,
    #[schema(value_type = String)]
    pub genre_id: ObjectId,
    #[validate(range(min = 0, max = 255, message = "numberInStock must be between 0 and 255"))]
    pub number_in_stock: i32,
    #[validate(range(min = 0, max = 255, message = "dailyRentalRate must be between 0 and 255"))]
    pub daily_rental_rate: i32,
}

/// Update game request
///
/// `consoleId` and `genreId` are independent: each one replaces its own
/// snapshot only when supplied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGame {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 250, message = "Title must be between 5 and 250 characters"))]
    pub title: String,
    #[schema(value_type = Option<String>)]
    pub console_id: Option<ObjectId>,
    #[schema(value_type = Option<String>)]
    pub genre_id: Option<ObjectId>,
    #[validate(range(min = 0, max = 255, message = "numberInStock must be between 0 and 255"))]
    pub number_in_stock: i32,
    #[validate(range(min = 0, max = 255, message = "dailyRentalRate must be between 0 and 255"))]
    pub daily_rental_rate: i32,
}

/// Game list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct GameQuery {
    /// Exact console name, e.g. "Super Nintendo"
    pub console: Option<String>,
    /// Exact genre name, e.g. "Role-playing"
    pub genre: Option<String>,
}

/// Normalize a game title: single-spaced, each word starting upper-case.
///
/// Unlike catalog names, the rest of each word keeps its case ("FIFA 98").
pub fn start_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
