//! Core quiz library used by the FastLearn front-ends.
//!
//! Provides:
//! - Parser for emoji-delimited quiz documents
//! - Dialogue extraction and narration text cleaning
//! - Question generation from raw two-speaker dialogue
//! - Fisher-Yates shuffling of questions and options
//! - Quiz session driver and narration state machine

pub mod conversation;
pub mod error;
pub mod generator;
pub mod loader;
pub mod narration;
pub mod normalizer;
pub mod parser;
pub mod session;
pub mod shuffle;
pub mod types;

pub use conversation::{clean_for_narration, extract_conversation, is_speaker_turn};
pub use error::{QuizError, Result};
pub use generator::{
    generate_from_dialogue, parse_audio_questions, DialogueQuestionGenerator, IntentSelection,
};
pub use loader::{load_question_set, load_question_set_with, SourceKind};
pub use narration::{NarrationEngine, NarrationStatus, Narrator, DEFAULT_LANGUAGE};
pub use normalizer::normalize;
pub use parser::{parse_block, parse_questions, ParserProfile};
pub use session::{AnswerFeedback, Progress, QuizSession, SessionSummary};
pub use shuffle::{shuffle_in_place, shuffled};
pub use types::{AnswerOption, Question, QuestionSet};
