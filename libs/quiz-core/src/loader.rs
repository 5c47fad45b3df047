//! Building shuffled question sets from source text.

use rand::Rng;

use crate::generator::{parse_audio_questions_with, DialogueQuestionGenerator};
use crate::parser::{parse_document_with, ParserProfile};
use crate::types::QuestionSet;

/// Which parser a document goes through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Structured quiz text.
    #[default]
    Plain,
    /// Listening exercise: structured text or raw `A:` / `B:` dialogue.
    Audio,
}

/// Parse `text` and randomize question order.
///
/// An empty set is the only failure signal.
pub fn load_question_set_with<R: Rng + ?Sized>(
    text: &str,
    kind: SourceKind,
    generator: &DialogueQuestionGenerator,
    rng: &mut R,
) -> QuestionSet {
    let questions = match kind {
        SourceKind::Plain => parse_document_with(text, &ParserProfile::PLAIN, rng),
        SourceKind::Audio => parse_audio_questions_with(text, generator, rng),
    };
    QuestionSet::shuffled(questions, rng)
}

/// [`load_question_set_with`] using defaults and the thread-local random source.
pub fn load_question_set(text: &str, kind: SourceKind) -> QuestionSet {
    load_question_set_with(
        text,
        kind,
        &DialogueQuestionGenerator::default(),
        &mut rand::thread_rng(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ: &str = "🧠 Pregunta 1\nOne\nA. a\nB. b\n✅ Correcta: A\n\n🧠 Pregunta 2\nTwo\nA. a\nB. b\n✅ Correcta: B\n\n🧠 Pregunta 3\nThree\nA. a\nB. b\n✅ Correcta: A";

    #[test]
    fn loads_every_valid_question() {
        let set = load_question_set(QUIZ, SourceKind::Plain);
        assert_eq!(set.len(), 3);
        let mut statements: Vec<_> = set.iter().map(|q| q.statement.as_str()).collect();
        statements.sort_unstable();
        assert_eq!(statements, vec!["One", "Three", "Two"]);
        for q in &set {
            assert!(q.correct_option().is_some());
        }
    }

    #[test]
    fn audio_kind_generates_from_dialogue() {
        let set = load_question_set("A: How are you?\nB: Fine.", SourceKind::Audio);
        assert_eq!(set.len(), 1);
        assert!(set.get(0).map(|q| q.has_audio).unwrap_or(false));
    }

    #[test]
    fn plain_kind_ignores_dialogue() {
        assert!(load_question_set("A: How are you?\nB: Fine.", SourceKind::Plain).is_empty());
    }
}
