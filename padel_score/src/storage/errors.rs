//! Storage error types.

use thiserror::Error;

use crate::engine::MatchId;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Match not present in history
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
