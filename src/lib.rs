//! Game recommendation core for questlog
//!
//! Turns catalog games into feature vectors over a trained vocabulary, builds a
//! taste profile from the games a user liked, assigns it to the closest
//! precomputed cluster and ranks that cluster's unseen games.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Game, GameStatus, Recommendation};
pub use services::{RecommendationModel, RecommendationService};
pub use state::AppState;
