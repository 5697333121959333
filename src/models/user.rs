//! User model, credentials and related types

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{trimmed, ObjectId};

/// Full user document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    /// Stored lower-cased; unique
    pub email: String,
    /// Hashed password (argon2, PHC string)
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserInfo {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 255, message = "Name must be between 5 and 255 characters"))]
    pub name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        email(message = "Invalid email format"),
        length(min = 5, max = 255, message = "Email must be between 5 and 255 characters")
    )]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 255, message = "Password must be between 5 and 255 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        email(message = "Invalid email format"),
        length(min = 5, max = 255, message = "Email must be between 5 and 255 characters")
    )]
    pub email: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 5, max = 255, message = "Password must be between 5 and 255 characters"))]
    pub password: String,
}

/// JWT claims carried by a credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(rename = "_id")]
    pub user_id: ObjectId,
    pub iat: i64,
    pub exp: i64,
}

impl UserClaims {
    /// Claims for a user, valid for `lifetime_hours` from now
    pub fn for_user(user_id: ObjectId, lifetime_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            user_id,
            iat: now,
            exp: now + (lifetime_hours as i64 * 3600),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
