use thiserror::Error;
use toytext::EnvError;

#[derive(Debug, Error)]
pub enum RlError {
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),

    #[error("Episode did not terminate within {max_steps} steps")]
    EpisodeLimit { max_steps: usize },

    #[error("No convergence after {iterations} sweeps, last delta {delta}")]
    NotConverged { iterations: usize, delta: f64 },

    #[error("Environment offers no states to start from")]
    EmptyStateSpace,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RlError>;
