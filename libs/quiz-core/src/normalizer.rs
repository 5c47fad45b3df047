//! Text normalization and block splitting.
//!
//! A quiz document is a sequence of blocks, each introduced by a header:
//!
//! ```text
//! 🧠 Pregunta 1
//! Hello
//! A. Hi
//! B. Bye
//! ✅ Correcta: A
//! 🧾 Explicación: Greeting.
//! ```
//!
//! Anything before the first header is preamble and is dropped.

use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown bold marker, removed everywhere before parsing.
pub const BOLD_MARKER: &str = "**";

/// Literal prefix of every question header.
pub const QUESTION_HEADER: &str = "🧠 Pregunta";

/// Placeholder some documents put where an audio clip would go.
pub const AUDIO_PLACEHOLDER: &str = "[Audio de conversación]";

static RE_QUESTION_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"🧠 Pregunta\s*\d+").unwrap());

/// Remove bold markers, leaving everything else intact.
pub fn strip_bold(text: &str) -> String {
    text.replace(BOLD_MARKER, "")
}

/// Whether `text` carries structured question markup at all.
pub fn has_question_header(text: &str) -> bool {
    text.contains(QUESTION_HEADER)
}

/// Split raw text into per-question blocks.
///
/// Returns an empty vector when there is no header.
pub fn normalize(raw: &str) -> Vec<String> {
    let clean = strip_bold(raw);
    RE_QUESTION_HEADER
        .split(&clean)
        .skip(1)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_header_yields_no_blocks() {
        assert!(normalize("").is_empty());
        assert!(normalize("just some notes\nA. not a question").is_empty());
    }

    #[test]
    fn preamble_is_discarded() {
        let blocks = normalize("Intro text\n🧠 Pregunta 1\nFirst\n🧠 Pregunta 2\nSecond");
        assert_eq!(blocks, vec!["\nFirst\n".to_string(), "\nSecond".to_string()]);
    }

    #[test]
    fn header_allows_missing_space_before_number() {
        let blocks = normalize("🧠 Pregunta12\nBody");
        assert_eq!(blocks, vec!["\nBody".to_string()]);
    }

    #[test]
    fn bold_markers_are_removed_from_blocks() {
        let blocks = normalize("**🧠 Pregunta 1**\n**What** is *this*?");
        assert_eq!(blocks, vec!["\nWhat is *this*?".to_string()]);
    }

    #[test]
    fn header_detection() {
        assert!(has_question_header("x\n🧠 Pregunta 3"));
        assert!(!has_question_header("A: hi\nB: hello"));
    }
}
