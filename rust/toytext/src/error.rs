use thiserror::Error;

/// Errors raised by an environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// A start state that the environment cannot represent.
    #[error("Invalid state {state}: {reason}")]
    InvalidState { state: String, reason: String },

    #[error("Invalid action {action}, expected one of 0..{n_a}")]
    InvalidAction { action: usize, n_a: usize },

    /// `step` called after the episode already ended.
    #[error("Episode is finished, call reset first")]
    EpisodeFinished,

    #[error("No outcome with positive probability")]
    EmptyDistribution,
}
