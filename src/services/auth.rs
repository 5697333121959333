//! Credential issuing and verification

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{ObjectId, UserClaims},
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issue a signed credential for a user
    pub fn issue(&self, user_id: ObjectId) -> AppResult<String> {
        UserClaims::for_user(user_id, self.config.jwt_expiration_hours)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify a credential and return its claims.
    ///
    /// Tampered, expired and malformed tokens all yield `InvalidToken`.
    pub fn verify(&self, token: &str) -> AppResult<UserClaims> {
        UserClaims::from_token(token, &self.config.jwt_secret).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            AppError::InvalidToken("Invalid token.".to_string())
        })
    }
}
