//! Chirp repository for database operations

use anyhow::Result;
use chirpy_shared::types::ChirpResponse;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Chirp record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChirpRecord {
    pub id: Uuid,
    pub body: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChirpRecord> for ChirpResponse {
    fn from(chirp: ChirpRecord) -> Self {
        ChirpResponse {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}

/// Chirp repository for database operations
pub struct ChirpRepository;

impl ChirpRepository {
    /// Create a new chirp
    pub async fn create(pool: &PgPool, user_id: Uuid, body: &str) -> Result<ChirpRecord> {
        let chirp = sqlx::query_as::<_, ChirpRecord>(
            r#"
            INSERT INTO chirps (body, user_id)
            VALUES ($1, $2)
            RETURNING id, body, user_id, created_at, updated_at
            "#,
        )
        .bind(body)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(chirp)
    }

    /// List chirps oldest first, optionally for a single author
    pub async fn list(pool: &PgPool, author_id: Option<Uuid>) -> Result<Vec<ChirpRecord>> {
        let chirps = sqlx::query_as::<_, ChirpRecord>(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM chirps
            WHERE $1::uuid IS NULL OR user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(pool)
        .await?;

        Ok(chirps)
    }

    /// Find chirp by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ChirpRecord>> {
        let chirp = sqlx::query_as::<_, ChirpRecord>(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(chirp)
    }

    /// Delete a chirp
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
