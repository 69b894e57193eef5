//! Application error handling
//!
//! Every handler returns [`ApiResult`]. Internal detail is logged here and
//! never reaches the response body.

use crate::auth::AuthError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chirpy_shared::{ErrorDetail, ErrorResponse, ValidationError};
use thiserror::Error;
use tracing::{error, warn};

/// Message for every credential check that fails on login
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Store errors arrive as anyhow; pull sqlx failures back out so they are
// reported as database errors.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sqlx::Error>() {
            Ok(db) => ApiError::Database(db),
            Err(other) => ApiError::Internal(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let reason = err.kind();
        metrics::counter!("chirpy_auth_failures_total", "reason" => reason).increment(1);

        match err {
            AuthError::Storage(inner) => ApiError::from(inner),
            err if err.is_internal() => ApiError::Internal(anyhow::Error::new(err)),
            AuthError::InvalidCredentials => {
                warn!(reason, "Login rejected");
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            _ => {
                warn!(reason, "Authentication failed");
                ApiError::Unauthorized("Unauthorized".to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            ApiError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            ApiError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            ApiError::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            ApiError::Forbidden(msg) => ("FORBIDDEN", msg.clone()),
            ApiError::Conflict(msg) => ("CONFLICT", msg.clone()),
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                ("INTERNAL_ERROR", "An internal error occurred".to_string())
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                ("DATABASE_ERROR", "A database error occurred".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field: None,
                details: None,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
