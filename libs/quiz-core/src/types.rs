//! Core types for the quiz model.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::shuffle::shuffle_in_place;

/// One lettered answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub letter: String,
    pub text: String,
}

impl AnswerOption {
    pub fn new(letter: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            letter: letter.into(),
            text: text.into(),
        }
    }
}

/// A parsed multiple-choice question.
///
/// `options` is already in display order. `correct_letter` always names one
/// of the options' letters; the parser refuses to build a question otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub statement: String,
    pub options: Vec<AnswerOption>,
    pub correct_letter: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_text: Option<String>,
    pub has_audio: bool,
}

impl Question {
    /// Look up an option by its letter.
    pub fn option(&self, letter: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.letter == letter)
    }

    /// The option holding the correct answer.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.option(&self.correct_letter)
    }

    pub fn is_correct(&self, letter: &str) -> bool {
        self.correct_letter == letter
    }

    /// Text to hand to a narration engine: the extracted dialogue when there
    /// is one, the statement otherwise.
    pub fn narration_text(&self) -> &str {
        self.audio_text.as_deref().unwrap_or(&self.statement)
    }
}

/// Ordered, immutable list of questions for one quiz session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a set, randomizing question order once.
    pub fn shuffled<R: Rng + ?Sized>(mut questions: Vec<Question>, rng: &mut R) -> Self {
        shuffle_in_place(&mut questions, rng);
        Self { questions }
    }

    /// Build a set keeping the given order.
    pub fn in_order(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(statement: &str) -> Question {
        Question {
            statement: statement.to_string(),
            options: vec![AnswerOption::new("A", "Hi"), AnswerOption::new("B", "Bye")],
            correct_letter: "A".to_string(),
            explanation: String::new(),
            audio_text: None,
            has_audio: false,
        }
    }

    #[test]
    fn correct_option_is_found_by_letter() {
        let q = question("Hello");
        assert_eq!(q.correct_option().map(|o| o.text.as_str()), Some("Hi"));
        assert!(q.is_correct("A"));
        assert!(!q.is_correct("B"));
    }

    #[test]
    fn narration_text_falls_back_to_statement() {
        let mut q = question("Hello");
        assert_eq!(q.narration_text(), "Hello");
        q.audio_text = Some("A: Hi".to_string());
        assert_eq!(q.narration_text(), "A: Hi");
    }

    #[test]
    fn shuffled_set_keeps_every_question() {
        let questions: Vec<_> = (0..10).map(|i| question(&format!("Q{i}"))).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let set = QuestionSet::shuffled(questions.clone(), &mut rng);

        assert_eq!(set.len(), 10);
        let mut got: Vec<_> = set.iter().map(|q| q.statement.clone()).collect();
        let mut want: Vec<_> = questions.into_iter().map(|q| q.statement).collect();
        got.sort();
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn empty_set() {
        let set = QuestionSet::default();
        assert!(set.is_empty());
        assert!(set.get(0).is_none());
    }
}
