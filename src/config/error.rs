//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Validation error with field and message
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted path of the offending key, e.g. `server.port`
        field: String,
        message: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// Both a configuration directory and a single file were requested
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    /// Error surfaced by the `config` crate while merging sources
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}
