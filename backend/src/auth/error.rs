//! Authentication failure taxonomy
//!
//! Every variant collapses to a small set of HTTP statuses at the boundary
//! (see `crate::error`), but the kind is kept here so it can be logged and
//! counted.

use thiserror::Error;

/// Typed authentication and session failure
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("token expired")]
    TokenExpired,

    #[error("token signature is invalid")]
    TokenInvalidSignature,

    #[error("token issuer is invalid")]
    TokenInvalidIssuer,

    #[error("token is malformed: {0}")]
    TokenMalformed(String),

    #[error("refresh token not found")]
    TokenNotFound,

    #[error("refresh token revoked")]
    TokenRevoked,

    #[error("authorization header missing")]
    MissingAuth,

    #[error("authorization header malformed")]
    MalformedAuth,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("API key does not match")]
    InvalidApiKey,

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AuthError {
    /// Stable label used for log fields and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Hashing(_) => "hashing",
            AuthError::Signing(_) => "signing",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenInvalidSignature => "token_invalid_signature",
            AuthError::TokenInvalidIssuer => "token_invalid_issuer",
            AuthError::TokenMalformed(_) => "token_malformed",
            AuthError::TokenNotFound => "token_not_found",
            AuthError::TokenRevoked => "token_revoked",
            AuthError::MissingAuth => "missing_auth",
            AuthError::MalformedAuth => "malformed_auth",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InvalidApiKey => "invalid_api_key",
            AuthError::Storage(_) => "storage",
        }
    }

    /// Whether this is an internal fault rather than a rejected caller
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Storage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_kinds() {
        assert!(AuthError::Hashing("oom".to_string()).is_internal());
        assert!(AuthError::Storage(anyhow::anyhow!("down")).is_internal());
        assert!(!AuthError::TokenExpired.is_internal());
        assert!(!AuthError::InvalidCredentials.is_internal());
    }

    #[test]
    fn test_kinds_are_distinct_for_token_failures() {
        let kinds = [
            AuthError::TokenExpired.kind(),
            AuthError::TokenInvalidSignature.kind(),
            AuthError::TokenInvalidIssuer.kind(),
            AuthError::TokenMalformed("bad".to_string()).kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
