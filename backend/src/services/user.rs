//! User registration and membership

use crate::auth::PasswordService;
use crate::error::ApiError;
use crate::store::Store;
use chirpy_shared::validation::{validate_email, validate_password};
use chirpy_shared::UserResponse;
use tracing::info;
use uuid::Uuid;

/// User account operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Password hashing is offloaded to the blocking thread pool.
    pub async fn register(
        store: &dyn Store,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, ApiError> {
        validate_email(email)?;
        validate_password(password)?;

        if store.email_exists(email).await? {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string()).await?;
        let user = store.create_user(email, &password_hash).await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Mark a user as a Chirpy Red member
    pub async fn upgrade_to_red(store: &dyn Store, user_id: Uuid) -> Result<UserResponse, ApiError> {
        let user = store
            .upgrade_to_red(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(%user_id, "User upgraded to Chirpy Red");
        Ok(user.into())
    }
}
