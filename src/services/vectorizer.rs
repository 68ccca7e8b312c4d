use chrono::{DateTime, Datelike};
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::Game;

use super::model::RecommendationModel;

type IdAccessor = fn(&Game) -> &[i64];

/// Categorical fields in encoding order
///
/// Each id becomes a `<field>_<id>` feature. Single-valued fields are treated
/// as lists of zero or one element.
static CATEGORICAL_FIELDS: [(&str, IdAccessor); 10] = [
    ("genres", |g| g.genres.as_slice()),
    ("platforms", |g| g.platforms.as_slice()),
    ("keywords", |g| g.keywords.as_slice()),
    ("themes", |g| g.themes.as_slice()),
    ("game_modes", |g| g.game_modes.as_slice()),
    ("player_perspectives", |g| g.player_perspectives.as_slice()),
    ("franchise", |g| g.franchise.as_slice()),
    ("game_type", |g| g.game_type.as_slice()),
    ("game_engines", |g| g.game_engines.as_slice()),
    ("collections", |g| g.collections.as_slice()),
];

const MIN_TOKEN_LEN: usize = 3;

/// Encodes games as binary feature vectors over the model vocabulary
#[derive(Debug, Clone)]
pub struct Vectorizer {
    model: Arc<RecommendationModel>,
}

impl Vectorizer {
    pub fn new(model: Arc<RecommendationModel>) -> Self {
        Self { model }
    }

    /// Length of every vector this vectorizer produces
    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    /// Maps a game to a vector of length V
    ///
    /// Never fails. Names missing from the vocabulary are skipped, and a field
    /// that cannot be encoded only drops its own features.
    pub fn vectorize(&self, game: &Game) -> Vec<f64> {
        let mut vector = self.model.zero_vector();
        let vocabulary = self.model.vocabulary();

        for name in self.feature_names(game) {
            if let Some(index) = vocabulary.index_of(&name) {
                vector[index] = 1.0;
            }
        }

        vector
    }

    /// Feature names derivable from a game, in rule order and without duplicates
    ///
    /// Includes names the vocabulary does not know about.
    pub fn feature_names(&self, game: &Game) -> Vec<String> {
        derive_features(game)
    }
}

fn derive_features(game: &Game) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    let mut push = |name: String| {
        if seen.insert(name.clone()) {
            names.push(name);
        }
    };

    for (field, ids) in CATEGORICAL_FIELDS.iter() {
        for id in ids(game) {
            push(format!("{}_{}", field, id));
        }
    }

    if let Some(timestamp) = game.first_release_date {
        match DateTime::from_timestamp(timestamp, 0) {
            Some(released) => {
                let year = released.year();
                push(format!("release_year_{}", year));
                push(format!("release_decade_{}s", year.div_euclid(10) * 10));
            }
            None => {
                tracing::debug!(game_id = game.id, timestamp, "Release date out of range, skipped");
            }
        }
    }

    if let Some(summary) = &game.summary {
        for token in tokenize(summary) {
            push(format!("summary_tokens_{}", token));
        }
    }

    if let Some(storyline) = &game.storyline {
        for token in tokenize(storyline) {
            push(format!("storyline_tokens_{}", token));
        }
    }

    if let Some(rating) = game.rating {
        if !rating.is_finite() {
            tracing::debug!(game_id = game.id, rating, "Non-finite rating, skipped");
        } else if let Some(tier) = rating_tier(rating) {
            push(format!("rating_tier_{}", tier));
        }
    }

    if let Some(count) = game.rating_count {
        push(format!("rating_count_tier_{}", rating_count_tier(count)));
    }

    names
}

/// Lower-cases the text and returns every maximal run of 3+ ASCII letters
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() {
            current.push(c);
            continue;
        }
        if current.len() >= MIN_TOKEN_LEN {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
    }

    if current.len() >= MIN_TOKEN_LEN {
        tokens.push(current);
    }

    tokens
}

fn rating_tier(rating: f64) -> Option<&'static str> {
    if rating > 84.0 {
        Some("acclaimed")
    } else if rating > 74.0 {
        Some("great")
    } else if rating > 64.0 {
        Some("good")
    } else if rating > 0.0 {
        Some("average")
    } else {
        None
    }
}

fn rating_count_tier(count: i64) -> &'static str {
    if count > 500 {
        "popular"
    } else if count > 50 {
        "known"
    } else if count > 0 {
        "niche"
    } else {
        "unrated"
    }
}
