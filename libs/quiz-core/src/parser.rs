//! Block parser for quiz documents.
//!
//! # Format
//! ```text
//! 🧠 Pregunta 1
//! A: What's your name?
//! B: I'm Ana.
//! ¿Qué preguntó la persona A?
//! A. Su nombre
//! B. Su edad
//! ✅ Correcta: A
//! 🧾 Explicación: A asked for B's name.
//! It is a common opener.
//! ```
//!
//! Each line is classified by an ordered list of rules; the first rule that
//! matches wins. Lines that match no rule are explanation continuations while
//! an explanation is open, and question text otherwise.

use rand::Rng;

use crate::conversation::extract_conversation;
use crate::normalizer::{normalize, AUDIO_PLACEHOLDER};
use crate::shuffle::shuffled;
use crate::types::{AnswerOption, Question};

/// Glyph opening the correct-answer line.
pub const CORRECT_MARKER: &str = "✅";
/// Word that must appear on the correct-answer line.
pub const CORRECT_KEYWORD: &str = "Correcta";
/// Word that must appear on an explanation header line.
pub const EXPLANATION_KEYWORD: &str = "Explicación";

/// Letters accepted on option lines.
const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Parameters distinguishing the plain and audio-aware parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserProfile {
    /// Glyphs that may open an explanation header.
    pub explanation_markers: &'static [&'static str],
    /// Whether to attach narration fields to emitted questions.
    pub with_audio: bool,
}

impl ParserProfile {
    /// Plain quiz documents.
    pub const PLAIN: Self = Self {
        explanation_markers: &["🧾"],
        with_audio: false,
    };

    /// Listening exercises, including generated ones.
    pub const AUDIO: Self = Self {
        explanation_markers: &["📋", "🧾"],
        with_audio: true,
    };
}

impl Default for ParserProfile {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// Classification of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType<'a> {
    Option { letter: &'a str, text: &'a str },
    Correct(Option<&'a str>),
    Explanation(&'a str),
    Text(&'a str),
    Empty,
}

type LineRule = for<'a> fn(&'a str, &ParserProfile) -> Option<LineType<'a>>;

/// Marker rules, in priority order.
const RULES: [LineRule; 3] = [option_rule, correct_rule, explanation_rule];

fn option_rule<'a>(line: &'a str, _profile: &ParserProfile) -> Option<LineType<'a>> {
    let mut chars = line.chars();
    let letter = chars.next().filter(|c| OPTION_LETTERS.contains(c))?;
    if chars.next() != Some('.') {
        return None;
    }
    let split = letter.len_utf8();
    Some(LineType::Option {
        letter: &line[..split],
        text: line[split + 1..].trim(),
    })
}

fn correct_rule<'a>(line: &'a str, _profile: &ParserProfile) -> Option<LineType<'a>> {
    if !(line.starts_with(CORRECT_MARKER) && line.contains(CORRECT_KEYWORD)) {
        return None;
    }
    let value = after_colon(line).filter(|v| !v.is_empty());
    Some(LineType::Correct(value))
}

fn explanation_rule<'a>(line: &'a str, profile: &ParserProfile) -> Option<LineType<'a>> {
    let opens = profile
        .explanation_markers
        .iter()
        .any(|marker| line.starts_with(marker));
    if !(opens && line.contains(EXPLANATION_KEYWORD)) {
        return None;
    }
    Some(LineType::Explanation(after_colon(line).unwrap_or("")))
}

/// Everything after the first colon, trimmed.
fn after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, rest)| rest.trim())
}

/// Classify a line with the marker rules, falling back to plain text.
pub fn classify_line<'a>(line: &'a str, profile: &ParserProfile) -> LineType<'a> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineType::Empty;
    }
    RULES
        .iter()
        .find_map(|rule| rule(trimmed, profile))
        .unwrap_or(LineType::Text(trimmed))
}

#[derive(Default)]
struct QuestionBuilder {
    statement: Vec<String>,
    options: Vec<AnswerOption>,
    correct: Option<String>,
    explanation: String,
    in_explanation: bool,
}

impl QuestionBuilder {
    fn process_line(&mut self, line: &str, profile: &ParserProfile) {
        match classify_line(line, profile) {
            LineType::Option { letter, text } => {
                self.options.push(AnswerOption::new(letter, text));
                self.in_explanation = false;
            }
            LineType::Correct(value) => {
                self.correct = value.map(str::to_string);
                self.in_explanation = false;
            }
            LineType::Explanation(value) => {
                self.explanation = value.to_string();
                self.in_explanation = true;
            }
            LineType::Text(text) if self.in_explanation => {
                if !self.explanation.is_empty() {
                    self.explanation.push(' ');
                }
                self.explanation.push_str(text);
            }
            LineType::Text(text) => {
                if !text.contains(AUDIO_PLACEHOLDER) {
                    self.statement.push(text.to_string());
                }
            }
            LineType::Empty => {}
        }
    }

    fn build<R: Rng + ?Sized>(self, profile: &ParserProfile, rng: &mut R) -> Option<Question> {
        let statement = self.statement.join("\n").trim().to_string();
        if statement.is_empty() || self.options.is_empty() {
            return None;
        }
        let correct_letter = self.correct?;
        if !self.options.iter().any(|o| o.letter == correct_letter) {
            return None;
        }
        let mut letters: Vec<&str> = self.options.iter().map(|o| o.letter.as_str()).collect();
        letters.sort_unstable();
        letters.dedup();
        if letters.len() != self.options.len() {
            return None;
        }

        let (audio_text, has_audio) = if profile.with_audio {
            let conversation = extract_conversation(&statement);
            let audio = if conversation.is_empty() {
                statement.clone()
            } else {
                conversation
            };
            (Some(audio), true)
        } else {
            (None, false)
        };

        Some(Question {
            options: shuffled(&self.options, rng),
            statement,
            correct_letter,
            explanation: self.explanation.trim().to_string(),
            audio_text,
            has_audio,
        })
    }
}

/// Parse one block into a question, or `None` when it is incomplete.
///
/// Option order is shuffled; letters stay attached to their text.
pub fn parse_block_with<R: Rng + ?Sized>(
    block: &str,
    profile: &ParserProfile,
    rng: &mut R,
) -> Option<Question> {
    let mut builder = QuestionBuilder::default();
    for line in block.trim().lines() {
        builder.process_line(line, profile);
    }
    builder.build(profile, rng)
}

/// [`parse_block_with`] using the thread-local random source.
pub fn parse_block(block: &str, profile: &ParserProfile) -> Option<Question> {
    parse_block_with(block, profile, &mut rand::thread_rng())
}

/// Parse a whole document, dropping incomplete blocks.
pub fn parse_document_with<R: Rng + ?Sized>(
    text: &str,
    profile: &ParserProfile,
    rng: &mut R,
) -> Vec<Question> {
    let blocks = normalize(text);
    let total = blocks.len();
    let questions: Vec<Question> = blocks
        .iter()
        .enumerate()
        .filter_map(|(idx, block)| {
            let parsed = parse_block_with(block, profile, rng);
            if parsed.is_none() {
                tracing::debug!(block = idx + 1, "dropping incomplete question block");
            }
            parsed
        })
        .collect();
    tracing::debug!(blocks = total, questions = questions.len(), "parsed quiz document");
    questions
}

/// Parse a plain quiz document.
pub fn parse_questions(text: &str) -> Vec<Question> {
    parse_document_with(text, &ParserProfile::PLAIN, &mut rand::thread_rng())
}
