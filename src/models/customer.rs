//! Customer model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{trimmed, ObjectId};

/// Customer document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub is_gold: bool,
}

/// Create or replace a customer profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 50, message = "Name must be between 5 and 50 characters"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 50, message = "Phone must be between 5 and 50 characters"))]
    pub phone: String,
    #[serde(default)]
    pub is_gold: bool,
}
