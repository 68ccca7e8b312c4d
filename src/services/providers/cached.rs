use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::AppResult,
    models::Game,
    services::providers::CatalogStore,
};

/// Read-through Redis cache in front of another catalog
///
/// Only cluster member lists are cached. They change when the offline job
/// reassigns clusters, so the TTL bounds staleness. Batch lookups by id pass
/// straight through.
#[derive(Clone)]
pub struct CachedCatalog {
    inner: Arc<dyn CatalogStore>,
    cache: Cache,
    ttl: u64,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn CatalogStore>, cache: Cache, ttl: u64) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait::async_trait]
impl CatalogStore for CachedCatalog {
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Game>> {
        self.inner.find_by_ids(ids).await
    }

    async fn find_by_cluster_id(&self, cluster_id: i32) -> AppResult<Vec<Game>> {
        let key = CacheKey::ClusterMembers(cluster_id);
        let inner = self.inner.clone();
        cached!(self.cache, key, self.ttl, async move {
            inner.find_by_cluster_id(cluster_id).await
        })
    }

    fn name(&self) -> &'static str {
        "redis_cached"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_redis_client;
    use crate::services::providers::MockCatalogStore;

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_inner_catalog() {
        // Nothing listens on port 1, so every cache read fails
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(client).await;

        let mut inner = MockCatalogStore::new();
        inner
            .expect_find_by_cluster_id()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|_| Ok(vec![Game::new(9, "Hollow Knight")]));

        let catalog = CachedCatalog::new(Arc::new(inner), cache, 60);

        let games = catalog.find_by_cluster_id(3).await.unwrap();
        assert_eq!(games, vec![Game::new(9, "Hollow Knight")]);
    }

    #[tokio::test]
    #[ignore = "needs a running Redis"]
    async fn test_cluster_members_served_from_cache_on_second_call() {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let client = create_redis_client(&redis_url).unwrap();
        let (cache, _handle) = Cache::new(client.clone()).await;

        let mut inner = MockCatalogStore::new();
        inner
            .expect_find_by_cluster_id()
            .withf(|id| *id == -42)
            .times(1)
            .returning(|_| Ok(vec![Game::new(1, "Celeste")]));

        let catalog = CachedCatalog::new(Arc::new(inner), cache, 60);

        let first = catalog.find_by_cluster_id(-42).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        let second = catalog.find_by_cluster_id(-42).await.unwrap();

        assert_eq!(first, second);

        let mut conn = client.get_multiplexed_async_connection().await.unwrap();
        let _: () = redis::AsyncCommands::del(&mut conn, "cluster:-42").await.unwrap();
    }
}
