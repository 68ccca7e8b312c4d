use super::similarity::{cosine_similarity, magnitude};

/// Finds the centroid most similar to `profile` by cosine similarity
///
/// Returns `None` when the profile has zero magnitude (no taste signal) or
/// there are no centroids. On exactly equal similarities the lowest index wins.
pub fn assign_cluster(profile: &[f64], centroids: &[Vec<f64>]) -> Option<usize> {
    if magnitude(profile) == 0.0 {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, centroid) in centroids.iter().enumerate() {
        let similarity = cosine_similarity(profile, centroid);
        if similarity.is_nan() {
            continue;
        }
        match best {
            Some((_, best_similarity)) if similarity <= best_similarity => {}
            _ => best = Some((index, similarity)),
        }
    }

    best.map(|(index, _)| index)
}
