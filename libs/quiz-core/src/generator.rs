//! Comprehension questions synthesized from raw two-speaker dialogue.
//!
//! Each adjacent pair of lines spoken by different speakers (`A:` then `B:`,
//! or the reverse) becomes one question, serialized in the same block format
//! the parser reads so it can be fed straight back into it.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::normalizer::has_question_header;
use crate::parser::{parse_document_with, ParserProfile};
use crate::shuffle::shuffle_in_place;
use crate::types::Question;

static RE_DIALOGUE_TURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:person\s+)?([ab]):\s*(.+)$").unwrap());

/// Letters assigned to generated options, by position.
const GENERATED_LETTERS: [&str; 3] = ["A", "B", "C"];

/// How to choose among several matching question kinds for one exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntentSelection {
    /// Use the highest-priority kind that matched.
    #[default]
    FirstMatch,
    /// Pick uniformly among every kind that matched.
    Random,
}

/// Kind of question derived from one exchange, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Speaker A asked for a name.
    AskName,
    /// Speaker A opened with a "how are you" style greeting.
    Greeting,
    /// Speaker B answered positively.
    PositiveReply,
    /// Nothing specific detected.
    Generic,
}

/// One `A:` / `B:` exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub first_speaker: String,
    pub first_line: String,
    pub second_speaker: String,
    pub second_line: String,
}

struct Template {
    prompt: String,
    correct: String,
    distractors: [&'static str; 3],
    explanation: String,
}

/// Parse a dialogue line into (speaker letter, uppercase) and spoken text.
fn dialogue_turn(line: &str) -> Option<(String, String)> {
    let caps = RE_DIALOGUE_TURN.captures(line)?;
    Some((caps[1].to_uppercase(), caps[2].to_string()))
}

/// Find every adjacent pair of turns by different speakers.
pub fn find_exchanges(conversation: &str) -> Vec<Exchange> {
    let turns: Vec<Option<(String, String)>> = conversation
        .trim()
        .lines()
        .map(|line| dialogue_turn(line.trim()))
        .collect();

    turns
        .windows(2)
        .filter_map(|pair| match pair {
            [Some((a, text_a)), Some((b, text_b))] if a != b => Some(Exchange {
                first_speaker: a.clone(),
                first_line: text_a.clone(),
                second_speaker: b.clone(),
                second_line: text_b.clone(),
            }),
            _ => None,
        })
        .collect()
}

/// Every intent whose keywords match, highest priority first.
pub fn matching_intents(exchange: &Exchange) -> Vec<Intent> {
    let first = exchange.first_line.to_lowercase();
    let second = exchange.second_line.to_lowercase();
    let mut intents = Vec::new();

    if first.contains("name") || first.contains("called") {
        intents.push(Intent::AskName);
    }
    if first.contains("how are you") || first.contains("how do you") {
        intents.push(Intent::Greeting);
    }
    if second.contains("well") || second.contains("fine") || second.contains("good") {
        intents.push(Intent::PositiveReply);
    }
    if intents.is_empty() {
        intents.push(Intent::Generic);
    }
    intents
}

fn template(intent: Intent, exchange: &Exchange) -> Template {
    let a = &exchange.first_speaker;
    let b = &exchange.second_speaker;
    match intent {
        Intent::AskName => Template {
            prompt: format!("¿Qué preguntó la persona {a}?"),
            correct: exchange.first_line.clone(),
            distractors: [
                "What's your last name?",
                "What's your favorite color?",
                "Where do you live?",
            ],
            explanation: format!(
                "La persona {a} preguntó por el nombre, no por otra información personal."
            ),
        },
        Intent::Greeting => Template {
            prompt: format!("¿Cómo saludó la persona {a}?"),
            correct: exchange.first_line.clone(),
            distractors: ["Good morning!", "See you later!", "Have a nice day!"],
            explanation: format!(
                "La persona {a} usó una forma común de saludo preguntando cómo está la otra persona."
            ),
        },
        Intent::PositiveReply => Template {
            prompt: format!("¿Cómo respondió la persona {b}?"),
            correct: exchange.second_line.clone(),
            distractors: [
                "I'm feeling terrible today",
                "I don't want to talk",
                "I'm very busy right now",
            ],
            explanation: format!("La persona {b} dio una respuesta positiva sobre cómo se siente."),
        },
        Intent::Generic => Template {
            prompt: format!("¿Qué dijo la persona {a}?"),
            correct: exchange.first_line.clone(),
            distractors: ["Nice to meet you", "Goodbye everyone", "Thank you very much"],
            explanation: format!("La persona {a} dijo exactamente: \"{}\"", exchange.first_line),
        },
    }
}

/// Synthesizes question blocks from dialogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogueQuestionGenerator {
    pub selection: IntentSelection,
}

impl DialogueQuestionGenerator {
    pub fn new(selection: IntentSelection) -> Self {
        Self { selection }
    }

    fn pick_intent<R: Rng + ?Sized>(&self, exchange: &Exchange, rng: &mut R) -> Intent {
        let intents = matching_intents(exchange);
        match self.selection {
            IntentSelection::FirstMatch => intents[0],
            IntentSelection::Random => *intents.choose(rng).unwrap_or(&Intent::Generic),
        }
    }

    /// Render one question block.
    ///
    /// Three options are kept: the correct text plus two distractors, shuffled
    /// and lettered A to C by position. The correct letter is found by text.
    pub fn render<R: Rng + ?Sized>(&self, number: usize, exchange: &Exchange, rng: &mut R) -> String {
        let intent = self.pick_intent(exchange, rng);
        let tpl = template(intent, exchange);

        let mut distractors: Vec<&str> = tpl
            .distractors
            .iter()
            .copied()
            .filter(|d| *d != tpl.correct)
            .collect();
        shuffle_in_place(&mut distractors, rng);

        let mut texts: Vec<&str> = vec![tpl.correct.as_str()];
        texts.extend(distractors.into_iter().take(GENERATED_LETTERS.len() - 1));
        shuffle_in_place(&mut texts, rng);

        let correct_letter = texts
            .iter()
            .position(|t| *t == tpl.correct)
            .map(|idx| GENERATED_LETTERS[idx])
            .unwrap_or(GENERATED_LETTERS[0]);

        let options = GENERATED_LETTERS
            .iter()
            .zip(&texts)
            .map(|(letter, text)| format!("{letter}. {text}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "🧠 Pregunta {number}\n\n{}: {}\n{}: {}\n\n{}\n\n{options}\n\n✅ Correcta: {correct_letter}\n📋 Explicación: {}",
            exchange.first_speaker,
            exchange.first_line,
            exchange.second_speaker,
            exchange.second_line,
            tpl.prompt,
            tpl.explanation,
        )
    }

    /// Render a block for every exchange, numbered from 1.
    pub fn generate_with<R: Rng + ?Sized>(&self, conversation: &str, rng: &mut R) -> Vec<String> {
        find_exchanges(conversation)
            .iter()
            .enumerate()
            .map(|(idx, exchange)| self.render(idx + 1, exchange, rng))
            .collect()
    }
}

/// Generate question blocks from dialogue with default settings.
pub fn generate_from_dialogue(conversation: &str) -> Vec<String> {
    DialogueQuestionGenerator::default().generate_with(conversation, &mut rand::thread_rng())
}

/// Parse listening-exercise text.
///
/// Structured text goes straight to the audio-aware parser; raw dialogue is
/// first turned into question blocks.
pub fn parse_audio_questions_with<R: Rng + ?Sized>(
    text: &str,
    generator: &DialogueQuestionGenerator,
    rng: &mut R,
) -> Vec<Question> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    if has_question_header(text) {
        return parse_document_with(text, &ParserProfile::AUDIO, rng);
    }

    let generated = generator.generate_with(text, rng);
    if generated.is_empty() {
        tracing::warn!("could not generate questions from the conversation");
        return Vec::new();
    }
    tracing::debug!(count = generated.len(), "generated questions from dialogue");
    parse_document_with(&generated.join("\n\n"), &ParserProfile::AUDIO, rng)
}

/// [`parse_audio_questions_with`] using defaults and the thread-local random source.
pub fn parse_audio_questions(text: &str) -> Vec<Question> {
    parse_audio_questions_with(
        text,
        &DialogueQuestionGenerator::default(),
        &mut rand::thread_rng(),
    )
}
