//! Error types for the application.

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chat relay has stopped")]
    RelayClosed,
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Slash-command registration and invocation errors.
///
/// None of these reach a player; they are logged and the operation is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{token} command already exists!")]
    AlreadyRegistered { token: String },

    #[error("Invalid command token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },

    #[error("Malformed {token} command: missing message body")]
    MissingBody { token: String },
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for command operations.
pub type CommandResult<T> = std::result::Result<T, CommandError>;
