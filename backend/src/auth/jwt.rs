//! JWT access token issuance and verification
//!
//! Access tokens are HS256-signed, carry the user ID as `sub` and the fixed
//! issuer `chirpy`, and are never stored server side. Keys are derived once
//! from the secret and cached.

use super::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Issuer claim embedded in and required of every access token
pub const ISSUER: &str = "chirpy";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, always [`ISSUER`]
    pub iss: String,
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for access token operations
///
/// Cheap to clone; keep one in `AppState` rather than building one per
/// request.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    access_token_ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service keyed by `secret`
    pub fn new(secret: &str, access_token_ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is dead the second after `exp`.
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
        }
    }

    /// Issue an access token with the configured lifetime
    #[inline]
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.issue(user_id, self.access_token_ttl)
    }

    /// Issue a token for `user_id` that expires `ttl` from now
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, self.keys.encoding())
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a token and return the user it was issued to
    ///
    /// Checks the signature, then expiry and issuer, then parses the
    /// subject. Each failure keeps its own [`AuthError`] kind.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let token_data =
            decode::<Claims>(token, self.keys.decoding(), &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => AuthError::TokenInvalidSignature,
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    ErrorKind::InvalidIssuer => AuthError::TokenInvalidIssuer,
                    _ => AuthError::TokenMalformed(e.to_string()),
                }
            })?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::TokenMalformed(format!("invalid subject: {}", e)))
    }

    /// Access token lifetime in seconds
    #[inline]
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }
}
