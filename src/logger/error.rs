//! Error types for the logger

use thiserror::Error;

/// Errors that can occur while configuring or installing the logger
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Format error: {message}")]
    Format { message: String },

    /// A global subscriber was already installed
    #[error("Failed to install subscriber: {message}")]
    Init { message: String },
}

impl LoggerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}
