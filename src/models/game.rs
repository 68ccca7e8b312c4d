use serde::{Deserialize, Serialize};

/// A catalog game as read from the catalog store
///
/// Categorical attributes are stored as ids; the recommender turns them into
/// `<field>_<id>` features. Single-valued attributes (franchise, game type,
/// engine, collection) are optional ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Game {
    /// Stable catalog identifier
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<i64>,
    #[serde(default)]
    pub platforms: Vec<i64>,
    #[serde(default)]
    pub keywords: Vec<i64>,
    #[serde(default)]
    pub themes: Vec<i64>,
    #[serde(default)]
    pub game_modes: Vec<i64>,
    #[serde(default)]
    pub player_perspectives: Vec<i64>,
    #[serde(default)]
    pub franchise: Option<i64>,
    #[serde(default)]
    pub game_type: Option<i64>,
    #[serde(default)]
    pub game_engines: Option<i64>,
    #[serde(default)]
    pub collections: Option<i64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub storyline: Option<String>,
    /// Release timestamp in seconds since the Unix epoch
    #[serde(default)]
    pub first_release_date: Option<i64>,
    /// Aggregated rating in [0, 100]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<i64>,
    /// Cluster assigned offline alongside centroid training
    #[serde(default)]
    pub cluster_id: Option<i32>,
}

impl Game {
    /// Creates a game with only an id and a name
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }
}

/// How a user has tracked a game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Played,
    /// Only liked games shape the taste profile
    Liked,
    WantsToPlay,
}

impl GameStatus {
    /// Value stored in the `user_games.status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Played => "played",
            GameStatus::Liked => "liked",
            GameStatus::WantsToPlay => "wants_to_play",
        }
    }
}
