/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Model artifact error: {0}")]
    ModelArtifact(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when the failure came from a collaborator (catalog, liked games, cache)
    /// rather than from the recommendation core itself
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::Cache(_) | AppError::Upstream(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
