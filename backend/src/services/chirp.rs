//! Chirp posting, listing and deletion

use crate::error::ApiError;
use crate::store::Store;
use chirpy_shared::validation::clean_chirp;
use chirpy_shared::{ChirpListQuery, ChirpResponse, SortOrder};
use tracing::info;
use uuid::Uuid;

/// Chirp operations
pub struct ChirpService;

impl ChirpService {
    /// Validate, filter and store a chirp for `user_id`
    pub async fn create(
        store: &dyn Store,
        user_id: Uuid,
        body: &str,
    ) -> Result<ChirpResponse, ApiError> {
        let cleaned = clean_chirp(body)?;
        let chirp = store.create_chirp(user_id, &cleaned).await?;

        info!(chirp_id = %chirp.id, %user_id, "Chirp created");
        Ok(chirp.into())
    }

    /// List chirps, optionally for one author, ordered by creation time
    pub async fn list(
        store: &dyn Store,
        query: &ChirpListQuery,
    ) -> Result<Vec<ChirpResponse>, ApiError> {
        let author_id = match query.author_id.as_deref() {
            Some(raw) if !raw.is_empty() => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| ApiError::BadRequest("Invalid author ID".to_string()))?,
            ),
            _ => None,
        };
        let sort = match query.sort.as_deref() {
            Some(raw) if !raw.is_empty() => raw.parse::<SortOrder>()?,
            _ => SortOrder::default(),
        };

        let mut chirps = store.list_chirps(author_id).await?;
        if sort == SortOrder::Desc {
            chirps.reverse();
        }

        Ok(chirps.into_iter().map(ChirpResponse::from).collect())
    }

    /// Fetch a single chirp
    pub async fn get(store: &dyn Store, chirp_id: Uuid) -> Result<ChirpResponse, ApiError> {
        store
            .find_chirp(chirp_id)
            .await?
            .map(ChirpResponse::from)
            .ok_or_else(|| ApiError::NotFound("Chirp not found".to_string()))
    }

    /// Delete a chirp owned by `user_id`
    pub async fn delete(store: &dyn Store, user_id: Uuid, chirp_id: Uuid) -> Result<(), ApiError> {
        let chirp = store
            .find_chirp(chirp_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Chirp not found".to_string()))?;

        if chirp.user_id != user_id {
            return Err(ApiError::Forbidden(
                "You can only delete your own chirps".to_string(),
            ));
        }

        // Lost a race with another delete
        if !store.delete_chirp(chirp_id).await? {
            return Err(ApiError::NotFound("Chirp not found".to_string()));
        }

        info!(%chirp_id, %user_id, "Chirp deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rstest::rstest;

    async fn store_with_users() -> (MemoryStore, Uuid, Uuid) {
        let store = MemoryStore::new();
        let walt = store.create_user("walt@example.com", "hash").await.unwrap();
        let jesse = store.create_user("jesse@example.com", "hash").await.unwrap();
        (store, walt.id, jesse.id)
    }

    fn query(author_id: Option<String>, sort: Option<&str>) -> ChirpListQuery {
        ChirpListQuery {
            author_id,
            sort: sort.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_masks_profanity() {
        let (store, walt, _) = store_with_users().await;
        let chirp = ChirpService::create(&store, walt, "What a Kerfuffle today")
            .await
            .unwrap();
        assert_eq!(chirp.body, "What a **** today");
        assert_eq!(chirp.user_id, walt);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(&"a".repeat(141))]
    #[tokio::test]
    async fn test_create_rejects_invalid_body(#[case] body: &str) {
        let (store, walt, _) = store_with_users().await;
        let result = ChirpService::create(&store, walt, body).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_sort_and_author_filter() {
        let (store, walt, jesse) = store_with_users().await;
        for (user, body) in [(walt, "first"), (jesse, "second"), (walt, "third")] {
            ChirpService::create(&store, user, body).await.unwrap();
        }

        let asc = ChirpService::list(&store, &query(None, None)).await.unwrap();
        let bodies: Vec<_> = asc.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);

        let desc = ChirpService::list(&store, &query(None, Some("desc")))
            .await
            .unwrap();
        let bodies: Vec<_> = desc.iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["third", "second", "first"]);

        let walts = ChirpService::list(&store, &query(Some(walt.to_string()), None))
            .await
            .unwrap();
        assert!(walts.iter().all(|c| c.user_id == walt));
        assert_eq!(walts.len(), 2);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_parameters() {
        let (store, _, _) = store_with_users().await;

        let bad_author = ChirpService::list(&store, &query(Some("nope".to_string()), None)).await;
        assert!(matches!(bad_author, Err(ApiError::BadRequest(_))));

        let bad_sort = ChirpService::list(&store, &query(None, Some("sideways"))).await;
        assert!(matches!(bad_sort, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_ownership() {
        let (store, walt, jesse) = store_with_users().await;
        let chirp = ChirpService::create(&store, walt, "mine").await.unwrap();

        let by_other = ChirpService::delete(&store, jesse, chirp.id).await;
        assert!(matches!(by_other, Err(ApiError::Forbidden(_))));
        assert!(ChirpService::get(&store, chirp.id).await.is_ok());

        ChirpService::delete(&store, walt, chirp.id).await.unwrap();
        let gone = ChirpService::get(&store, chirp.id).await;
        assert!(matches!(gone, Err(ApiError::NotFound(_))));

        let again = ChirpService::delete(&store, walt, chirp.id).await;
        assert!(matches!(again, Err(ApiError::NotFound(_))));
    }
}
