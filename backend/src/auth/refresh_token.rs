//! Opaque refresh tokens
//!
//! A refresh token is 32 random bytes, hex encoded. It means nothing on its
//! own; the stored row decides who it belongs to, when it expires and
//! whether it was revoked.

use super::AuthError;
use crate::store::Store;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use tracing::debug;
use uuid::Uuid;

/// Random bytes per token (64 hex characters)
pub const TOKEN_BYTES: usize = 32;

/// Default refresh token lifetime
pub const DEFAULT_TTL_DAYS: i64 = 60;

/// A token that has been persisted and may be handed to the client
#[derive(Debug, Clone)]
pub struct IssuedRefreshToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Refresh token lifecycle: generate, issue, resolve, revoke
#[derive(Debug, Clone)]
pub struct RefreshTokenService {
    ttl: Duration,
}

impl Default for RefreshTokenService {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_DAYS)
    }
}

impl RefreshTokenService {
    pub fn new(ttl_days: i64) -> Self {
        Self {
            ttl: Duration::days(ttl_days),
        }
    }

    /// 32 bytes from the OS CSPRNG as lowercase hex
    ///
    /// No uniqueness check; the store's unique constraint is the guard.
    pub fn generate() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Generate and persist a token for `user_id`
    ///
    /// If the store rejects the insert, no token is returned.
    pub async fn issue(
        &self,
        store: &dyn Store,
        user_id: Uuid,
    ) -> Result<IssuedRefreshToken, AuthError> {
        let token = Self::generate();
        let expires_at = Utc::now() + self.ttl;

        store
            .insert_refresh_token(&token, user_id, expires_at)
            .await
            .map_err(AuthError::Storage)?;

        debug!(%user_id, %expires_at, "Refresh token issued");
        Ok(IssuedRefreshToken { token, expires_at })
    }

    /// Map a token back to its user if it is still usable
    pub async fn resolve(&self, store: &dyn Store, token: &str) -> Result<Uuid, AuthError> {
        let record = store
            .find_refresh_token(token)
            .await
            .map_err(AuthError::Storage)?
            .ok_or(AuthError::TokenNotFound)?;

        if record.revoked_at.is_some() {
            return Err(AuthError::TokenRevoked);
        }
        if Utc::now() >= record.expires_at {
            return Err(AuthError::TokenExpired);
        }

        Ok(record.user_id)
    }

    /// Revoke a token. Idempotent; unknown tokens are accepted silently.
    pub async fn revoke(&self, store: &dyn Store, token: &str) -> Result<(), AuthError> {
        store
            .revoke_refresh_token(token)
            .await
            .map_err(AuthError::Storage)
    }
}
