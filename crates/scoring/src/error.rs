use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{ContestantId, JudgeId};
use crate::sync::SyncError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid score: {0}")]
    InvalidScore(#[from] ScoreRejection),

    #[error("Scoring is locked: {0}")]
    Locked(String),

    #[error("Unknown judge: {0}")]
    UnknownJudge(String),

    #[error("Contestant {contestant} is not assigned to judge {judge}")]
    NotAssigned {
        judge: JudgeId,
        contestant: ContestantId,
    },

    #[error("Not found")]
    NotFound,

    #[error("This action cannot be undone and must be explicitly confirmed")]
    ConfirmationRequired,

    #[error("Invalid contest configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

/// Why a score write was refused before it reached the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreRejection {
    #[error("unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("criterion '{0}' has no value")]
    MissingCriterion(String),

    #[error("criterion '{criterion}' must be between 0 and {max}, got {value}")]
    OutOfRange {
        criterion: String,
        value: Decimal,
        max: Decimal,
    },
}

impl ScoringError {
    pub fn is_sync_failure(&self) -> bool {
        matches!(self, ScoringError::Sync(_))
    }
}
