//! Storage-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the durable slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to read the slot
    #[error("Failed to read board from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write the slot
    #[error("Failed to write board to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the data directory
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to find a data directory
    #[error("Failed to find a data directory")]
    DataDirectoryNotFound,

    /// The slot holds something that is not a board document
    #[error("Stored board is corrupt: {0}")]
    Corrupt(String),

    /// Failed to serialize the board
    #[error("Failed to serialize board: {0}")]
    Serialize(String),

    /// The storage key cannot be used as a file name
    #[error("Invalid storage key '{0}': expected a plain file name")]
    InvalidKey(String),
}
