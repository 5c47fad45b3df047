//! Error handling for the command-line front-end

use quiz_core::QuizError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported file: {0} (only .txt, .md or folders)")]
    UnsupportedFile(String),

    #[error("Path escapes content root: {0}")]
    OutsideRoot(String),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
