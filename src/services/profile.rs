use crate::{
    error::AppResult,
    models::Game,
    services::{
        providers::{CatalogStore, LikedGames},
        vectorizer::Vectorizer,
    },
};

/// Builds taste profiles as the mean vector of a user's liked games
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    vectorizer: Vectorizer,
}

impl ProfileBuilder {
    pub fn new(vectorizer: Vectorizer) -> Self {
        Self { vectorizer }
    }

    /// Computes the taste profile for a user
    ///
    /// A user with no liked games, or whose liked games are all gone from the
    /// catalog, gets the zero vector. Collaborator failures are propagated.
    pub async fn build(
        &self,
        user_id: i64,
        liked_games: &dyn LikedGames,
        catalog: &dyn CatalogStore,
    ) -> AppResult<Vec<f64>> {
        let liked_ids = liked_games.liked_game_ids(user_id).await?;
        if liked_ids.is_empty() {
            tracing::debug!(user_id, "No liked games, using zero profile");
            return Ok(vec![0.0; self.vectorizer.dimension()]);
        }

        let games = catalog.find_by_ids(&liked_ids).await?;
        if games.len() < liked_ids.len() {
            tracing::debug!(
                user_id,
                liked = liked_ids.len(),
                found = games.len(),
                "Some liked games are missing from the catalog"
            );
        }

        Ok(self.average(&games))
    }

    /// Element-wise mean of the games' vectors, zero vector for no games
    pub fn average(&self, games: &[Game]) -> Vec<f64> {
        let mut profile = vec![0.0; self.vectorizer.dimension()];
        if games.is_empty() {
            return profile;
        }

        for game in games {
            let vector = self.vectorizer.vectorize(game);
            for (sum, value) in profile.iter_mut().zip(&vector) {
                *sum += value;
            }
        }

        let count = games.len() as f64;
        for value in profile.iter_mut() {
            *value /= count;
        }

        profile
    }
}
