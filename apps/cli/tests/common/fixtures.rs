//! Test fixtures and factory functions for creating quiz documents.

/// Generate a quiz document with `num_questions` blocks.
///
/// Question `i` (1-based) has options A..D and `A` as the correct answer.
///
/// # Arguments
/// * `num_questions` - Number of question blocks to generate
/// * `with_preamble` - Whether to put free text before the first header
pub fn sample_quiz(num_questions: usize, with_preamble: bool) -> String {
    let blocks = (1..=num_questions)
        .map(|i| {
            format!(
                "🧠 Pregunta {i}\n**Question {i}?**\nA. Right {i}\nB. Wrong {i}\nC. Other {i}\nD. Last {i}\n✅ Correcta: A\n🧾 Explicación: Because {i}.\n"
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    if with_preamble {
        format!("# Unit notes\nSome introduction.\n\n{blocks}")
    } else {
        blocks
    }
}

/// A short two-speaker dialogue without quiz markup.
pub fn sample_dialogue() -> &'static str {
    "A: Hi! What's your name?\nB: I'm Isabel.\nA: How are you today?\nB: I'm fine, thanks."
}

/// A structured listening exercise with the audio placeholder.
pub fn sample_listening_quiz() -> &'static str {
    "🧠 Pregunta 1\n[Audio de conversación]\nHugo: Where is the station?\nIsabel: Next to the bank.\n¿Dónde está la estación?\nA. Next to the bank\nB. Behind the school\nC. In the park\n✅ Correcta: A\n📋 Explicación: Isabel says it is next to the bank.\n"
}
