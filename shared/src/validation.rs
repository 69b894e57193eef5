//! Input validation functions
//!
//! This module provides validation utilities for user input, plus the
//! chirp text filter applied before a chirp is stored.

use crate::errors::ValidationError;
use validator::ValidateEmail;

/// Maximum chirp length, in characters
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Words masked out of chirp bodies
pub const PROFANE_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

/// Replacement for a masked word
pub const PROFANITY_MASK: &str = "****";

/// Validate email format
///
/// The single email check for every path that stores an address. Syntax
/// follows the HTML5 rules implemented by `validator`, so single-label
/// domains such as `localhost` are accepted.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if email.len() > 255 {
        return Err(ValidationError::EmailTooLong);
    }
    if !email.validate_email() {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Validate a chirp body and return it with profane words masked
///
/// Words are split on single spaces so the input spacing survives the
/// round trip. Matching is case-insensitive and whole-word only: a word with
/// trailing punctuation (`"Sharbert!"`) is left alone.
pub fn clean_chirp(body: &str) -> Result<String, ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyChirp);
    }

    let length = body.chars().count();
    if length > MAX_CHIRP_LENGTH {
        return Err(ValidationError::ChirpTooLong {
            max: MAX_CHIRP_LENGTH,
            actual: length,
        });
    }

    let cleaned = body
        .split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                PROFANITY_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(cleaned)
}
