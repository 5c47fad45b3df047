//! Error types for quiz-core.
//!
//! Parsing never fails: malformed content yields fewer (or zero) questions.
//! These errors cover the session driver and narration collaborators.

use crate::narration::NarrationStatus;
use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors raised by the session driver and the narrator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizError {
    #[error("no question left to answer")]
    NoCurrentQuestion,

    #[error("question {index} was already answered")]
    AlreadyAnswered { index: usize },

    #[error("option {letter} is not offered for this question")]
    UnknownOption { letter: String },

    #[error("no valid text to narrate")]
    EmptyNarration,

    #[error("narration engine error: {0}")]
    Engine(String),

    #[error("cannot {action} narration while {status}")]
    InvalidTransition {
        action: &'static str,
        status: NarrationStatus,
    },
}
