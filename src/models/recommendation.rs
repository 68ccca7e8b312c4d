use serde::{Deserialize, Serialize};

/// A single ranked recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub id: i64,
    pub name: String,
    /// Dot product between the taste profile and the game's feature vector
    pub score: f64,
}
