//! Postgres-backed catalog and user tracking
//!
//! Reads the `games` and `user_games` tables created by the migrations in
//! `migrations/`. Cluster membership comes from the `cluster_id` column written
//! by the offline training job.

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Game, GameStatus},
    services::providers::{CatalogStore, LikedGames},
};

const GAME_COLUMNS: &str = "id, name, genres, platforms, keywords, themes, game_modes, \
    player_perspectives, franchise, game_type, game_engines, collections, summary, storyline, \
    first_release_date, rating, rating_count, cluster_id";

#[derive(Clone)]
pub struct PgCatalog {
    db_pool: PgPool,
}

impl PgCatalog {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalog {
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Game>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM games WHERE id = ANY($1) ORDER BY id",
            GAME_COLUMNS
        );
        let games = sqlx::query_as::<_, Game>(&query)
            .bind(ids)
            .fetch_all(&self.db_pool)
            .await?;

        if games.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                found = games.len(),
                "Some requested games are missing from the catalog"
            );
        }

        Ok(games)
    }

    async fn find_by_cluster_id(&self, cluster_id: i32) -> AppResult<Vec<Game>> {
        let query = format!(
            "SELECT {} FROM games WHERE cluster_id = $1 ORDER BY id",
            GAME_COLUMNS
        );
        let games = sqlx::query_as::<_, Game>(&query)
            .bind(cluster_id)
            .fetch_all(&self.db_pool)
            .await?;

        tracing::debug!(cluster_id, members = games.len(), "Loaded cluster members");

        Ok(games)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

#[async_trait::async_trait]
impl LikedGames for PgCatalog {
    async fn liked_game_ids(&self, user_id: i64) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT game_id
            FROM user_games
            WHERE user_id = $1 AND status = $2
            ORDER BY game_id
            "#,
        )
        .bind(user_id)
        .bind(GameStatus::Liked.as_str())
        .fetch_all(&self.db_pool)
        .await?;

        Ok(ids)
    }

    async fn tracked_game_ids(&self, user_id: i64) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT game_id
            FROM user_games
            WHERE user_id = $1
            ORDER BY game_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(ids)
    }
}
