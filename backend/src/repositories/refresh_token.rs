//! Refresh token repository for database operations
//!
//! Rows are only ever inserted and marked revoked; nothing here deletes
//! them. Deleting the owning user cascades.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Refresh token record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Refresh token repository for database operations
pub struct RefreshTokenRepository;

impl RefreshTokenRepository {
    /// Store a freshly generated token
    pub async fn insert(
        pool: &PgPool,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Look up a token by value
    pub async fn find(pool: &PgPool, token: &str) -> Result<Option<RefreshTokenRecord>> {
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            SELECT token, user_id, expires_at, revoked_at, created_at, updated_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Mark a token revoked
    ///
    /// The first revocation timestamp wins; repeating the call or passing an
    /// unknown token changes nothing.
    pub async fn revoke(pool: &PgPool, token: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens SET
                revoked_at = NOW(),
                updated_at = NOW()
            WHERE token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
