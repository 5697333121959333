//! Data models for the rental server

pub mod catalog;
pub mod customer;
pub mod game;
pub mod object_id;
pub mod rental;
pub mod timestamp;
pub mod user;

use serde::{Deserialize, Deserializer};

// Re-export commonly used types
pub use catalog::{CatalogKind, CatalogSnapshot, Console, Genre};
pub use customer::Customer;
pub use game::Game;
pub use object_id::ObjectId;
pub use rental::{CustomerSnapshot, GameSnapshot, Rental};
pub use user::{User, UserClaims, UserInfo};

/// Deserialize a string with surrounding whitespace removed
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}
