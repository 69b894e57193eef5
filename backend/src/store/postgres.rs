//! PostgreSQL-backed store

use super::Store;
use crate::db;
use crate::repositories::{
    ChirpRecord, ChirpRepository, RefreshTokenRecord, RefreshTokenRepository, UserRecord,
    UserRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// [`Store`] over a PostgreSQL pool
///
/// `PgPool` is internally Arc'd, so cloning is O(1).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRecord> {
        UserRepository::create(&self.pool, email, password_hash).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        UserRepository::find_by_email(&self.pool, email).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        UserRepository::email_exists(&self.pool, email).await
    }

    async fn update_credentials(
        &self,
        user_id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<UserRecord>> {
        UserRepository::update_credentials(&self.pool, user_id, email, password_hash).await
    }

    async fn upgrade_to_red(&self, user_id: Uuid) -> Result<Option<UserRecord>> {
        UserRepository::upgrade_to_red(&self.pool, user_id).await
    }

    async fn insert_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        RefreshTokenRepository::insert(&self.pool, token, user_id, expires_at).await
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        RefreshTokenRepository::find(&self.pool, token).await
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<()> {
        let changed = RefreshTokenRepository::revoke(&self.pool, token).await?;
        if !changed {
            debug!("revoke matched no active refresh token");
        }
        Ok(())
    }

    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<ChirpRecord> {
        ChirpRepository::create(&self.pool, user_id, body).await
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<ChirpRecord>> {
        ChirpRepository::list(&self.pool, author_id).await
    }

    async fn find_chirp(&self, id: Uuid) -> Result<Option<ChirpRecord>> {
        ChirpRepository::find_by_id(&self.pool, id).await
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool> {
        ChirpRepository::delete(&self.pool, id).await
    }

    async fn health_check(&self) -> Result<()> {
        db::health_check(&self.pool).await
    }
}
