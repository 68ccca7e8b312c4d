pub mod game;
pub mod recommendation;

pub use game::{Game, GameStatus};
pub use recommendation::Recommendation;
