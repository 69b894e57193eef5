//! Session service: login, token refresh, revocation and credential updates
//!
//! Password hashing and verification run on the blocking thread pool. Login
//! failures are indistinguishable to the caller whether the email is unknown
//! or the password is wrong.

use crate::auth::{AuthError, JwtService, PasswordService, RefreshTokenService};
use crate::error::ApiError;
use crate::store::Store;
use chirpy_shared::validation::{validate_email, validate_password};
use chirpy_shared::{SessionResult, UserResponse};
use once_cell::sync::Lazy;
use tracing::{debug, info};
use uuid::Uuid;

// Verified against when the email is unknown so both failure paths cost one
// argon2 verification.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("chirpy-dummy-password").ok());

/// Session lifecycle operations
pub struct SessionService;

impl SessionService {
    /// Check credentials and open a session
    ///
    /// Returns the user view with a fresh access token and a persisted
    /// refresh token. If either token cannot be produced the login fails.
    pub async fn login(
        store: &dyn Store,
        jwt: &JwtService,
        refresh_tokens: &RefreshTokenService,
        email: &str,
        password: &str,
    ) -> Result<SessionResult, AuthError> {
        let Some(user) = store.find_user_by_email(email).await? else {
            // First use builds the hash, so force it off the async workers too
            let password = password.to_string();
            let _ = tokio::task::spawn_blocking(move || {
                if let Some(dummy) = DUMMY_HASH.as_deref() {
                    let _ = PasswordService::verify(&password, dummy);
                }
            })
            .await;
            return Err(AuthError::InvalidCredentials);
        };

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone()).await?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = jwt.issue_access_token(user.id)?;
        let refresh = refresh_tokens.issue(store, user.id).await?;

        metrics::counter!("chirpy_logins_total").increment(1);
        info!(user_id = %user.id, "User logged in");

        Ok(SessionResult {
            user: user.into(),
            token,
            refresh_token: refresh.token,
        })
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(
        store: &dyn Store,
        jwt: &JwtService,
        refresh_tokens: &RefreshTokenService,
        refresh_token: &str,
    ) -> Result<String, AuthError> {
        let user_id = refresh_tokens.resolve(store, refresh_token).await?;
        let token = jwt.issue_access_token(user_id)?;

        metrics::counter!("chirpy_token_refreshes_total").increment(1);
        debug!(%user_id, "Access token refreshed");
        Ok(token)
    }

    /// Revoke a refresh token
    pub async fn revoke(
        store: &dyn Store,
        refresh_tokens: &RefreshTokenService,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        refresh_tokens.revoke(store, refresh_token).await
    }

    /// Replace the authenticated user's email and password
    pub async fn update_credentials(
        store: &dyn Store,
        user_id: Uuid,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, ApiError> {
        validate_email(email)?;
        validate_password(password)?;

        if let Some(existing) = store.find_user_by_email(email).await? {
            if existing.id != user_id {
                return Err(ApiError::Conflict("Email already registered".to_string()));
            }
        }

        let password_hash = PasswordService::hash_async(password.to_string()).await?;
        let user = store
            .update_credentials(user_id, email, &password_hash)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(%user_id, "Credentials updated");
        Ok(user.into())
    }
}
