//! Scoring engine error types.

use thiserror::Error;

use super::models::MatchId;

/// Errors raised by match operations.
///
/// All of these indicate caller misuse; an operation that fails leaves the
/// match record untouched.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ScoreError {
    #[error("no active set in match {0}")]
    NoActiveSet(MatchId),
    #[error("no active game in set {0}")]
    NoActiveGame(u32),
    #[error("match {0} is already completed")]
    MatchCompleted(MatchId),
    #[error("match {0} is paused")]
    MatchPaused(MatchId),
    #[error("invalid sets to win: {0} (expected 2 or 3)")]
    InvalidSetsToWin(u32),
    #[error("touch counts {left}+{right} overflow the match statistics")]
    TouchOverflow { left: u32, right: u32 },
}

/// Result type for scoring operations
pub type ScoreResult<T> = Result<T, ScoreError>;
