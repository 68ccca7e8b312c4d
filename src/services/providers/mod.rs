//! Collaborators the recommendation core reads from
//!
//! The core never owns catalog storage or user state. It consumes these traits,
//! which have a Postgres-backed implementation, a Redis read-through decorator,
//! and an in-memory implementation for snapshots and tests.

use crate::{error::AppResult, models::Game};

pub mod cached;
pub mod in_memory;
pub mod postgres;

pub use cached::CachedCatalog;
pub use in_memory::InMemoryCatalog;
pub use postgres::PgCatalog;

/// Read access to the game catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetches games by id in one batch
    ///
    /// Ids with no matching game are silently absent from the result.
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Game>>;

    /// Fetches every game whose persisted cluster assignment is `cluster_id`
    ///
    /// Iteration order must be stable, since ranking ties keep it.
    async fn find_by_cluster_id(&self, cluster_id: i32) -> AppResult<Vec<Game>>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Read access to what a user has tracked
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LikedGames: Send + Sync {
    /// Ids of the games the user has marked liked
    async fn liked_game_ids(&self, user_id: i64) -> AppResult<Vec<i64>>;

    /// Ids of every game the user has tracked, whatever the status
    async fn tracked_game_ids(&self, user_id: i64) -> AppResult<Vec<i64>>;
}
