//! Board operation error types.

use crate::storage::StorageError;

/// Errors that can occur while mutating or reading the board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// No task carries the given identifier
    #[error("Task not found: {id}")]
    NotFound { id: String },

    /// A required field was missing or malformed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The durable slot could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// An internal consistency check failed; the operation was aborted
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl BoardError {
    /// Whether the caller can report the error and carry on with the same
    /// board state.
    ///
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BoardError::NotFound { .. } | BoardError::Validation(_))
    }
}
