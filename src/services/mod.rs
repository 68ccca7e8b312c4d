pub mod clustering;
pub mod model;
pub mod profile;
pub mod providers;
pub mod ranker;
pub mod recommendations;
pub mod similarity;
pub mod vectorizer;

pub use model::{RecommendationModel, Vocabulary};
pub use recommendations::RecommendationService;
pub use vectorizer::Vectorizer;
