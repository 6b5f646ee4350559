//! Error taxonomy
//!
//! Every variant is a local invariant violation. There is no I/O in this
//! crate, so nothing here is retryable.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid player id {0}, expected 1 or 2")]
    InvalidPlayer(u8),

    #[error("point recorded while input is locked")]
    UnexpectedScoreWhileLocked,

    #[error("invalid match config: {0}")]
    InvalidConfig(String),

    #[error("invalid match config JSON: {0}")]
    InvalidConfigJson(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
