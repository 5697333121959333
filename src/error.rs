//! Error types for the game rental server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::repository::StoreError;

/// Stable error codes reported alongside the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    StoreFailure = 3,
    NoSuchEntity = 4,
    BadValue = 5,
    Duplicate = 6,
    OutOfStock = 7,
    AlreadyReturned = 8,
    InvalidCredentials = 9,
    InvalidToken = 10,
    InvalidObjectId = 11,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist (reported as a client error)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The addressed resource does not exist (reported as 404)
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// A path identifier is not a well-formed ObjectId
    #[error("Invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Already returned: {0}")]
    AlreadyReturned(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No credential was supplied
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A credential was supplied but could not be verified
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::BAD_REQUEST, ErrorCode::NoSuchEntity, msg.clone()),
            AppError::ResourceNotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEntity, msg.clone())
            }
            AppError::InvalidObjectId(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::InvalidObjectId, msg.clone())
            }
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, ErrorCode::Duplicate, msg.clone()),
            AppError::OutOfStock(msg) => (StatusCode::BAD_REQUEST, ErrorCode::OutOfStock, msg.clone()),
            AppError::AlreadyReturned(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::AlreadyReturned, msg.clone())
            }
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidCredentials,
                "Invalid email or password.".to_string(),
            ),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::InvalidToken(msg) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidToken, msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StoreFailure,
                    "Something failed.".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }

    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate { collection, field } => {
                AppError::Conflict(format!("A {} with the same {} already exists.", collection.singular(), field))
            }
            other => AppError::Store(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
