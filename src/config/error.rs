//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Saving was attempted before a location was chosen
    #[error("Configuration was never loaded, no file to save to")]
    NotLoaded,

    /// Failed to find home directory
    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    /// Failed to read the configuration file
    #[error("Failed to read configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for this application
    #[error("Invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Failed to write the configuration file
    #[error("Failed to save configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create configuration directory
    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// A hotkey binding could not be parsed
    #[error("Invalid hotkey '{0}'")]
    InvalidHotkey(String),

    /// The configured theme does not exist
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),
}
