use std::sync::Arc;

use crate::{
    config::Config,
    db::{self, Cache, CacheWriterHandle},
    services::{
        providers::{CachedCatalog, CatalogStore, PgCatalog},
        RecommendationModel, RecommendationService,
    },
    telemetry,
};

/// Everything a host service needs to serve recommendations
///
/// Built once at startup. Failing to load the model artifact or reach the
/// stores aborts startup; there is no degraded mode.
pub struct AppState {
    pub config: Config,
    pub recommendations: RecommendationService,
    cache_writer: CacheWriterHandle,
}

impl AppState {
    /// Loads config from the environment and wires the service
    pub async fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        Self::new(config).await
    }

    pub async fn new(config: Config) -> anyhow::Result<Self> {
        telemetry::init_tracing(&config.log_filter);

        let model = Arc::new(RecommendationModel::load(&config.model_artifact_path)?);

        let db_pool = db::create_pool(&config.database_url).await?;
        db::run_migrations(&db_pool).await?;

        let redis_client = db::create_redis_client(&config.redis_url)?;
        let (cache, cache_writer) = Cache::new(redis_client).await;

        let pg_catalog = Arc::new(PgCatalog::new(db_pool));
        let catalog: Arc<dyn CatalogStore> = Arc::new(CachedCatalog::new(
            pg_catalog.clone(),
            cache,
            config.cluster_cache_ttl,
        ));

        let recommendations = RecommendationService::new(
            model,
            catalog,
            pg_catalog,
            config.recommendation_limit(),
        );

        tracing::info!(
            features = recommendations.model().dimension(),
            clusters = recommendations.model().cluster_count(),
            limit = config.recommendation_limit(),
            "Recommendation service ready"
        );

        Ok(Self {
            config,
            recommendations,
            cache_writer,
        })
    }

    /// Flushes pending cache writes
    pub async fn shutdown(self) {
        self.cache_writer.shutdown().await;
    }
}
