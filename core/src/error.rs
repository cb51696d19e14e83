//! Error types and handling for Obverter Launch Core

use thiserror::Error;

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Obverter Launch Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Trainer launch errors
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    /// Launch record errors
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Field '{field}' must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Trainer launch errors
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("No Python interpreter found (tried {tried})")]
    InterpreterNotFound { tried: String },

    #[error("Training script not found: {path}")]
    ScriptNotFound { path: String },

    #[error("Failed to spawn trainer: {message}")]
    SpawnFailed { message: String },
}

/// Launch record errors
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to write launch record: {message}")]
    WriteFailed { message: String },

    #[error("Failed to load launch record: {path}")]
    LoadFailed { path: String },

    #[error("Invalid launch record format")]
    InvalidFormat,
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
