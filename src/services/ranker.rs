use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Game, Recommendation},
    services::{
        clustering::assign_cluster, model::RecommendationModel, providers::CatalogStore,
        similarity::dot, vectorizer::Vectorizer,
    },
};

/// Hard cap on the number of recommendations in one result
pub const MAX_RECOMMENDATIONS: usize = 100;

/// Ranks the unseen games of the profile's cluster by dot product
#[derive(Debug, Clone)]
pub struct Ranker {
    model: Arc<RecommendationModel>,
    vectorizer: Vectorizer,
    limit: usize,
}

impl Ranker {
    /// Creates a ranker returning at most `limit` results (capped at 100)
    pub fn new(model: Arc<RecommendationModel>, limit: usize) -> Self {
        Self {
            vectorizer: Vectorizer::new(model.clone()),
            model,
            limit: limit.min(MAX_RECOMMENDATIONS),
        }
    }

    /// Recommends games for a taste profile
    ///
    /// An empty result means "no recommendations" (zero profile, empty cluster,
    /// or nothing with positive overlap). Catalog failures are errors.
    pub async fn rank(
        &self,
        profile: &[f64],
        excluded_ids: &HashSet<i64>,
        catalog: &dyn CatalogStore,
    ) -> AppResult<Vec<Recommendation>> {
        let Some(cluster) = assign_cluster(profile, self.model.centroids()) else {
            tracing::debug!("Profile has no cluster assignment");
            return Ok(Vec::new());
        };

        let cluster_id = i32::try_from(cluster)
            .map_err(|_| AppError::Internal(format!("cluster index {} overflows", cluster)))?;

        let candidates = catalog.find_by_cluster_id(cluster_id).await?;

        tracing::debug!(
            cluster_id,
            store = catalog.name(),
            candidates = candidates.len(),
            excluded = excluded_ids.len(),
            "Scoring cluster candidates"
        );

        Ok(self.score_candidates(profile, candidates, excluded_ids))
    }

    /// Scores, filters, sorts and truncates already-fetched candidates
    pub fn score_candidates(
        &self,
        profile: &[f64],
        candidates: Vec<Game>,
        excluded_ids: &HashSet<i64>,
    ) -> Vec<Recommendation> {
        let mut scored: Vec<Recommendation> = candidates
            .into_iter()
            .filter(|game| !excluded_ids.contains(&game.id))
            .filter_map(|game| {
                let score = dot(profile, &self.vectorizer.vectorize(&game));
                // NaN fails this comparison too
                (score > 0.0).then(|| Recommendation {
                    id: game.id,
                    name: game.name,
                    score,
                })
            })
            .collect();

        // Stable: ties keep catalog order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.limit);

        scored
    }
}
