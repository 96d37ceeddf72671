//! Error types for the CLI

use deskcalc::command::KeySequenceError;
use deskcalc::clock::ClockError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed key sequence
    #[error("Invalid key sequence: {0}")]
    KeySequence(#[from] KeySequenceError),

    /// Zone list rejected by the clock
    #[error("Clock error: {0}")]
    Clock(#[from] ClockError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal could not be set up or restored
    #[error("Terminal error: {message}")]
    Terminal {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a terminal error
    #[must_use]
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }
}
