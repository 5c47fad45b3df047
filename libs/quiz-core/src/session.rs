//! Single-player quiz session over a [`QuestionSet`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::types::{Question, QuestionSet};

/// Outcome of answering the current question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub selected: String,
    pub correct_letter: String,
    pub is_correct: bool,
    pub explanation: String,
}

impl AnswerFeedback {
    /// Short verdict shown to the player.
    pub fn message(&self) -> String {
        if self.is_correct {
            "✓ Correcto".to_string()
        } else {
            format!("✗ Incorrecto. La correcta es {}", self.correct_letter)
        }
    }
}

/// Final tally of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Where the cursor went after [`QuizSession::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    Next(usize),
    Finished(SessionSummary),
}

/// Cursor and score over an immutable question set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: QuestionSet,
    cursor: usize,
    current_answer: Option<AnswerFeedback>,
    answered: usize,
    correct: usize,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    pub fn new(questions: QuestionSet) -> Self {
        Self {
            questions,
            cursor: 0,
            current_answer: None,
            answered: 0,
            correct: 0,
            started_at: Utc::now(),
        }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    /// Feedback for the current question, once answered.
    pub fn current_answer(&self) -> Option<&AnswerFeedback> {
        self.current_answer.as_ref()
    }

    /// Answer the current question with an option letter.
    pub fn answer(&mut self, letter: &str) -> Result<AnswerFeedback> {
        let question = self.current().ok_or(QuizError::NoCurrentQuestion)?;
        if self.current_answer.is_some() {
            return Err(QuizError::AlreadyAnswered { index: self.cursor });
        }
        let letter = letter.trim();
        if question.option(letter).is_none() {
            return Err(QuizError::UnknownOption {
                letter: letter.to_string(),
            });
        }

        let feedback = AnswerFeedback {
            selected: letter.to_string(),
            correct_letter: question.correct_letter.clone(),
            is_correct: question.is_correct(letter),
            explanation: question.explanation.clone(),
        };

        self.answered += 1;
        if feedback.is_correct {
            self.correct += 1;
        }
        self.current_answer = Some(feedback.clone());
        Ok(feedback)
    }

    /// Move to the next question, answered or not.
    pub fn advance(&mut self) -> Progress {
        if !self.is_finished() {
            self.cursor += 1;
        }
        self.current_answer = None;

        if self.is_finished() {
            Progress::Finished(self.summary())
        } else {
            Progress::Next(self.cursor)
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total: self.questions.len(),
            answered: self.answered,
            correct: self.correct,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}
