use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the ranking engine
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MatchError {
    /// Malformed or mismatched inputs, e.g. score sequences of unequal length
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Nothing to rank: empty requester profile or empty candidate pool
    #[error("Not found: {0}")]
    NotFound(String),

    /// The semantic encoder cannot be invoked
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

/// Transport-agnostic classification of a [`MatchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchErrorKind {
    InvalidInput,
    NotFound,
    Unavailable,
}

impl MatchError {
    pub fn kind(&self) -> MatchErrorKind {
        match self {
            MatchError::InvalidInput(_) => MatchErrorKind::InvalidInput,
            MatchError::NotFound(_) => MatchErrorKind::NotFound,
            MatchError::Unavailable(_) => MatchErrorKind::Unavailable,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, MatchError::Unavailable(_))
    }
}
