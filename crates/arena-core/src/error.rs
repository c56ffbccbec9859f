//! Error types for the arena core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Invalid move {0}: expected 0 (cooperate) or 1 (defect)")]
    InvalidMove(String),

    #[error("Rounds per match must be between 1 and 100000, got {rounds}")]
    InvalidRounds { rounds: u32 },

    #[error("Monte Carlo needs at least two trials for a sample variance, got {trials}")]
    InvalidTrials { trials: u32 },

    #[error("Tournament roster is empty")]
    EmptyRoster,

    #[error("Cannot summarise an empty sample")]
    EmptySample,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ArenaError>;

impl From<serde_json::Error> for ArenaError {
    fn from(err: serde_json::Error) -> Self {
        ArenaError::Config(err.to_string())
    }
}
