//! Error types for the Chirpy application

use thiserror::Error;

/// Input validation failures shared by the backend and its clients
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Email too long")]
    EmailTooLong,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Password too long")]
    PasswordTooLong,

    #[error("Chirp cannot be empty")]
    EmptyChirp,

    #[error("Chirp is too long")]
    ChirpTooLong { max: usize, actual: usize },

    #[error("Invalid sort order: {0}")]
    InvalidSortOrder(String),
}
