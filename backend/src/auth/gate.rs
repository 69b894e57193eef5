//! Credential extraction from request headers
//!
//! Pure functions over a `HeaderMap` so the rules can be tested without a
//! router. The axum extractors in `middleware` are thin wrappers.

use super::{AuthError, JwtService};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Scheme prefix for access and refresh tokens
pub const BEARER_PREFIX: &str = "Bearer ";

/// Scheme prefix for webhook API keys
pub const API_KEY_PREFIX: &str = "ApiKey ";

fn authorization(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    match headers.get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|v| Some(v).filter(|v| !v.is_empty()))
            .map_err(|_| AuthError::MalformedAuth),
    }
}

/// Token from `Authorization: Bearer <token>`
///
/// The prefix is matched exactly, case included, and the token is returned
/// as written. A token of only whitespace counts as missing.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = authorization(headers)?.ok_or(AuthError::MissingAuth)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedAuth)?;

    if token.trim().is_empty() {
        return Err(AuthError::MissingAuth);
    }
    Ok(token)
}

/// Verify the bearer access token and return the caller's user ID
pub fn authenticate(headers: &HeaderMap, jwt: &JwtService) -> Result<Uuid, AuthError> {
    let token = extract_bearer(headers)?;
    jwt.verify(token)
}

/// Key from `Authorization: ApiKey <key>`
///
/// Anything other than a well-formed, non-empty key counts as missing.
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = authorization(headers)
        .ok()
        .flatten()
        .ok_or(AuthError::MissingAuth)?;

    match value.strip_prefix(API_KEY_PREFIX) {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(AuthError::MissingAuth),
    }
}

/// Configured webhook API key
///
/// Held as a secret so it never shows up in `Debug` output.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::new(key.into()))
    }

    /// Constant-time comparison against a presented key
    ///
    /// Both sides are hashed first so neither content nor length leaks
    /// through timing.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.expose_secret();
        if expected.is_empty() {
            return false;
        }
        constant_time_eq(
            &Sha256::digest(expected.as_bytes()),
            &Sha256::digest(candidate.as_bytes()),
        )
    }

    /// Extract the key from `headers` and check it
    pub fn verify(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let presented = extract_api_key(headers)?;
        if self.matches(presented) {
            Ok(())
        } else {
            Err(AuthError::InvalidApiKey)
        }
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}
