//! User registration and login service

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        user::{LoginRequest, RegisterUser},
        ObjectId, User, UserInfo,
    },
    repository::Repository,
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    auth: AuthService,
}

impl UsersService {
    pub fn new(repository: Repository, auth: AuthService) -> Self {
        Self { repository, auth }
    }

    /// Register a new user and issue a credential for it
    pub async fn register(&self, data: &RegisterUser) -> AppResult<(UserInfo, String)> {
        let email = data.email.to_lowercase();
        if self.repository.users_find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already registered.".to_string()));
        }

        let user = User {
            id: ObjectId::new(),
            name: data.name.clone(),
            email,
            password: hash_password(&data.password)?,
        };
        self.repository.users_create(&user).await?;
        tracing::info!(id = %user.id, "User registered");

        let token = self.auth.issue(user.id)?;
        Ok((UserInfo::from(&user), token))
    }

    /// Check an email/password pair and issue a credential.
    ///
    /// An unknown email still costs one Argon2 verification, against a
    /// placeholder hash, so both failures take the same time.
    pub async fn login(&self, data: &LoginRequest) -> AppResult<(String, UserInfo)> {
        let user = self
            .repository
            .users_find_by_email(&data.email.to_lowercase())
            .await?;

        let Some(user) = user else {
            verify_password(placeholder_hash()?, &data.password)?;
            tracing::debug!("Login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(&user.password, &data.password)? {
            tracing::debug!(id = %user.id, "Login rejected: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.auth.issue(user.id)?;
        Ok((token, UserInfo::from(&user)))
    }

    /// Public profile of the authenticated user
    pub async fn me(&self, id: ObjectId) -> AppResult<UserInfo> {
        self.repository
            .users_get_by_id(id)
            .await?
            .map(|user| UserInfo::from(&user))
            .ok_or_else(|| AppError::NotFound("User with the given id does not exist.".to_string()))
    }
}

/// Hash a password using Argon2
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Argon2 hash of a random secret, computed once
fn placeholder_hash() -> AppResult<&'static str> {
    static PLACEHOLDER: OnceLock<String> = OnceLock::new();
    if let Some(hash) = PLACEHOLDER.get() {
        return Ok(hash.as_str());
    }
    let secret = SaltString::generate(&mut OsRng);
    let hash = hash_password(secret.as_str())?;
    Ok(PLACEHOLDER.get_or_init(|| hash).as_str())
}

#[cfg(test)]
thread_local! {
    static VERIFICATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    #[cfg(test)]
    VERIFICATIONS.with(|count| count.set(count.get() + 1));

    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
