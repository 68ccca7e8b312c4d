use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{Game, GameStatus},
    services::providers::{CatalogStore, LikedGames},
};

/// Catalog and tracking state held in memory
///
/// Games keep insertion order, which is the iteration order seen by the ranker.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    games: Vec<Game>,
    tracked: HashMap<i64, Vec<(i64, GameStatus)>>,
}

impl InMemoryCatalog {
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games,
            tracked: HashMap::new(),
        }
    }

    /// Adds a game to the catalog
    pub fn insert(&mut self, game: Game) {
        self.games.push(game);
    }

    /// Records that a user tracked a game, replacing any earlier status
    pub fn track(&mut self, user_id: i64, game_id: i64, status: GameStatus) {
        let entries = self.tracked.entry(user_id).or_default();
        match entries.iter_mut().find(|(id, _)| *id == game_id) {
            Some(entry) => entry.1 = status,
            None => entries.push((game_id, status)),
        }
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Game>> {
        Ok(self
            .games
            .iter()
            .filter(|g| ids.contains(&g.id))
            .cloned()
            .collect())
    }

    async fn find_by_cluster_id(&self, cluster_id: i32) -> AppResult<Vec<Game>> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.cluster_id == Some(cluster_id))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

#[async_trait::async_trait]
impl LikedGames for InMemoryCatalog {
    async fn liked_game_ids(&self, user_id: i64) -> AppResult<Vec<i64>> {
        Ok(self
            .tracked
            .get(&user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, status)| *status == GameStatus::Liked)
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn tracked_game_ids(&self, user_id: i64) -> AppResult<Vec<i64>> {
        Ok(self
            .tracked
            .get(&user_id)
            .map(|entries| entries.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default())
    }
}
