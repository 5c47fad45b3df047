//! Speaker-turn detection for narration.
//!
//! A speaker turn is a line starting with `A:` / `B:` (optionally
//! `Person A:`, any case) or with a capitalized name such as `Isabel:`.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_LETTER_SPEAKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(person\s+)?[ab]:\s*").unwrap());
static RE_NAMED_SPEAKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+:\s*").unwrap());

static RE_LETTER_TURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(person\s+)?[ab]:\s*.+").unwrap());
static RE_NAMED_TURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][a-z]+:\s*.+").unwrap());

static RE_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)🧠\s*Pregunta\s*\d+").unwrap());
static RE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[Audio de conversación\]").unwrap());
static RE_SPANISH_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"¿.*?\?").unwrap());
static RE_OPTION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*[A-D]\.[ \t]*.*").unwrap());
static RE_CORRECT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)✅\s*Correcta:\s*[A-D]").unwrap());
static RE_EXPLANATION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)(📋|🧾)\s*Explicación:.*$").unwrap());
static RE_EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}]")
        .unwrap()
});

/// Whether a (trimmed) line opens with a speaker label.
pub fn is_speaker_turn(line: &str) -> bool {
    RE_LETTER_SPEAKER.is_match(line) || RE_NAMED_SPEAKER.is_match(line)
}

/// Like [`is_speaker_turn`] but also requires something after the label.
fn is_spoken_turn(line: &str) -> bool {
    RE_LETTER_TURN.is_match(line) || RE_NAMED_TURN.is_match(line)
}

/// Keep only the speaker-turn lines of a question statement, in order.
///
/// Returns an empty string when the statement contains no dialogue.
pub fn extract_conversation(question_text: &str) -> String {
    question_text
        .lines()
        .map(str::trim)
        .filter(|line| is_speaker_turn(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reduce arbitrary question text to what should be read aloud.
///
/// Dialogue lines win when present. Otherwise the quiz markup (header,
/// placeholder, Spanish prompts, options, answer and explanation markers,
/// emoji) is stripped and the dialogue search is retried. If there is still
/// no dialogue the stripped text is returned with whitespace collapsed.
pub fn clean_for_narration(text: &str) -> String {
    let direct = spoken_lines(text);
    if !direct.is_empty() {
        return direct;
    }

    let stripped = strip_quiz_markup(text);
    let retried = spoken_lines(&stripped);
    if !retried.is_empty() {
        return retried;
    }

    tracing::debug!("no dialogue detected, narrating stripped text");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn spoken_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_spoken_turn(line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_quiz_markup(text: &str) -> String {
    let text = RE_HEADER.replace_all(text, "");
    let text = RE_PLACEHOLDER.replace_all(&text, "");
    let text = RE_SPANISH_QUESTION.replace_all(&text, "");
    let text = RE_OPTION_LINE.replace_all(&text, "");
    let text = RE_CORRECT_MARKER.replace_all(&text, "");
    let text = RE_EXPLANATION_LINE.replace_all(&text, "");
    let text = RE_EMOJI.replace_all(&text, "");
    text.trim().to_string()
}
