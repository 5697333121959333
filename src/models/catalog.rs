//! Console and genre reference data

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use utoipa::ToSchema;
use validator::Validate;

use super::ObjectId;
use crate::error::{AppError, AppResult};

/// Which reference list a catalog entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Console,
    Genre,
}

impl CatalogKind {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Console => "Console",
            CatalogKind::Genre => "Genre",
        }
    }
}

/// Console document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Console {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
}

/// Genre document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
}

/// Copy of a console or genre embedded in a game at write time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogSnapshot {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
}

impl From<&Console> for CatalogSnapshot {
    fn from(console: &Console) -> Self {
        Self {
            id: console.id,
            name: console.name.clone(),
        }
    }
}

impl From<&Genre> for CatalogSnapshot {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

/// Create or rename a console or genre
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CatalogNameInput {
    #[validate(length(min = 1, max = 50, message = "Name is required"))]
    pub name: String,
}

/// Title-case a single word: first character upper, the rest lower
fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Normalize a catalog name: NFC, trimmed, single-spaced, title-cased
pub fn title_case(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    composed
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a name and check it against the allowed set.
///
/// Membership is case-insensitive; the title-cased form is returned.
pub fn normalize_catalog_name(kind: CatalogKind, raw: &str, allowed: &[String]) -> AppResult<String> {
    let normalized = title_case(raw);
    if normalized.is_empty() {
        return Err(AppError::Validation(format!("{} name is required", kind.label())));
    }

    let known = allowed
        .iter()
        .any(|candidate| title_case(candidate).to_lowercase() == normalized.to_lowercase());
    if !known {
        return Err(AppError::Validation(format!(
            "\"{}\" is not a valid {} name",
            raw.trim(),
            kind.label().to_lowercase()
        )));
    }

    Ok(normalized)
}
