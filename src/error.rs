//! Application-wide error types.
//!
//! This module defines the top of the error hierarchy. Board, storage and
//! configuration failures each have their own enum and convert into
//! `AppError` with `?`.

pub use crate::board::BoardError;
pub use crate::config::ConfigError;
pub use crate::storage::StorageError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised by board operations
    #[error("{0}")]
    Board(#[from] BoardError),

    /// Errors raised while opening or saving the board
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),

    /// Bad command line input
    #[error("{0}")]
    Usage(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
