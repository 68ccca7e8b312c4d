use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::AppResult,
    models::Recommendation,
    services::{
        model::RecommendationModel,
        profile::ProfileBuilder,
        providers::{CatalogStore, LikedGames},
        ranker::Ranker,
        vectorizer::Vectorizer,
    },
};

/// Entry point for callers asking for game recommendations
///
/// Holds the shared model and the collaborators. Stateless across requests,
/// so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct RecommendationService {
    model: Arc<RecommendationModel>,
    catalog: Arc<dyn CatalogStore>,
    liked_games: Arc<dyn LikedGames>,
    profiles: ProfileBuilder,
    ranker: Ranker,
}

impl RecommendationService {
    pub fn new(
        model: Arc<RecommendationModel>,
        catalog: Arc<dyn CatalogStore>,
        liked_games: Arc<dyn LikedGames>,
        limit: usize,
    ) -> Self {
        Self {
            profiles: ProfileBuilder::new(Vectorizer::new(model.clone())),
            ranker: Ranker::new(model.clone(), limit),
            model,
            catalog,
            liked_games,
        }
    }

    pub fn model(&self) -> &RecommendationModel {
        &self.model
    }

    /// Mean feature vector of the games the user liked
    pub async fn build_user_profile_vector(&self, user_id: i64) -> AppResult<Vec<f64>> {
        self.profiles
            .build(user_id, self.liked_games.as_ref(), self.catalog.as_ref())
            .await
    }

    /// Top games in the profile's cluster, excluding `excluded_ids`
    pub async fn get_recommendations(
        &self,
        profile: &[f64],
        excluded_ids: &[i64],
    ) -> AppResult<Vec<Recommendation>> {
        let excluded: HashSet<i64> = excluded_ids.iter().copied().collect();
        self.ranker
            .rank(profile, &excluded, self.catalog.as_ref())
            .await
    }

    /// Builds the user's profile and ranks games they have not tracked yet
    pub async fn recommend_for_user(&self, user_id: i64) -> AppResult<Vec<Recommendation>> {
        let start = Instant::now();

        let profile = self.build_user_profile_vector(user_id).await?;
        let tracked = self.liked_games.tracked_game_ids(user_id).await?;
        let recommendations = self.get_recommendations(&profile, &tracked).await?;

        tracing::info!(
            user_id,
            tracked = tracked.len(),
            recommendations = recommendations.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}
