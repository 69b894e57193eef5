//! Persistence collaborator
//!
//! Services talk to storage only through [`Store`]. [`PgStore`] is the
//! production implementation on top of the sqlx repositories;
//! [`MemoryStore`] keeps everything in process for tests and local runs.
//!
//! Implementations must make each single-row read, write and update atomic.
//! Nothing above this layer takes locks.

use crate::repositories::{ChirpRecord, RefreshTokenRecord, UserRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage operations the services depend on
#[async_trait]
pub trait Store: Send + Sync {
    /// Create a user. Fails if the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRecord>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Replace email and password hash. `None` if the user does not exist.
    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>>;

    /// Set the Chirpy Red flag. `None` if the user does not exist.
    async fn upgrade_to_red(&self, user_id: Uuid) -> Result<Option<UserRecord>>;

    /// Persist a refresh token with no revocation. Fails on a duplicate value.
    async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>>;

    /// Mark a token revoked. Unknown and already revoked tokens are not errors.
    async fn revoke_refresh_token(&self, token: &str) -> Result<()>;

    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<ChirpRecord>;

    /// All chirps, or one author's, oldest first
    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<ChirpRecord>>;

    async fn find_chirp(&self, id: Uuid) -> Result<Option<ChirpRecord>>;

    /// Returns whether a row was deleted
    async fn delete_chirp(&self, id: Uuid) -> Result<bool>;

    /// Cheap round trip used by the readiness probe
    async fn health_check(&self) -> Result<()>;
}
