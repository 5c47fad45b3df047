//! Interactive terminal driver: file picker and quiz loop.
//!
//! Both loops read commands line by line from any `BufRead` and write to any
//! `Write`, so they run the same against stdin/stdout and in-memory buffers.

use std::io::{BufRead, Write};

use quiz_core::{
    AnswerFeedback, NarrationEngine, NarrationStatus, Narrator, Progress, Question, QuizSession,
    SessionSummary,
};

use crate::engine::PollFinished;
use crate::error::Result;
use crate::source::{parent_path, ContentSource, EntryKind};

/// Read one trimmed line; `None` at end of input.
fn read_command<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Walk the content tree until the user picks a quiz file.
///
/// Returns `None` when the user quits.
pub fn select_file<S, R, W>(source: &S, input: &mut R, output: &mut W) -> Result<Option<String>>
where
    S: ContentSource,
    R: BufRead,
    W: Write,
{
    let mut path = String::new();
    loop {
        let entries = source.list(&path)?;
        let title = if path.is_empty() { "Repositorio raíz" } else { path.as_str() };
        writeln!(output, "\n{title}")?;
        for (idx, entry) in entries.iter().enumerate() {
            writeln!(output, "  {:>2}. {} {}", idx + 1, entry.icon(), entry.name)?;
        }
        write!(output, "Elige un número, '..' para subir o 'q' para salir: ")?;
        output.flush()?;

        let Some(choice) = read_command(input)? else {
            return Ok(None);
        };
        match choice.as_str() {
            "q" | "Q" => return Ok(None),
            ".." => path = parent_path(&path),
            _ => {
                let picked = choice
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|idx| entries.get(idx));
                match picked {
                    Some(entry) if entry.kind == EntryKind::Dir => path = entry.path.clone(),
                    Some(entry) if entry.is_quiz_file() => return Ok(Some(entry.path.clone())),
                    Some(_) => writeln!(output, "Solo .txt, .md o carpetas")?,
                    None => writeln!(output, "Opción no válida")?,
                }
            }
        }
    }
}

fn show_question<W: Write>(output: &mut W, session: &QuizSession, question: &Question) -> Result<()> {
    writeln!(
        output,
        "\n🧠 Pregunta {}/{}\n\n{}\n",
        session.position() + 1,
        session.len(),
        question.statement
    )?;
    for option in &question.options {
        writeln!(output, "  {}. {}", option.letter, option.text)?;
    }
    if question.has_audio {
        writeln!(output, "\n  [p] escuchar  [z] pausar/reanudar  [s] detener")?;
    }
    Ok(())
}

fn show_feedback<W: Write>(output: &mut W, feedback: &AnswerFeedback) -> Result<()> {
    writeln!(output, "\n{}", feedback.message())?;
    if !feedback.explanation.is_empty() {
        writeln!(output, "{}", feedback.explanation)?;
    }
    Ok(())
}

fn toggle_pause<E: NarrationEngine>(narrator: &mut Narrator<E>) -> quiz_core::Result<()> {
    match narrator.status() {
        NarrationStatus::Paused => narrator.resume(),
        _ => narrator.pause(),
    }
}

/// Run the quiz until every question is done or the user quits.
pub fn run_quiz<E, R, W>(
    session: &mut QuizSession,
    narrator: &mut Narrator<E>,
    input: &mut R,
    output: &mut W,
) -> Result<SessionSummary>
where
    E: NarrationEngine + PollFinished,
    R: BufRead,
    W: Write,
{
    while let Some(question) = session.current().cloned() {
        show_question(output, session, &question)?;

        loop {
            if narrator.engine_mut().poll_finished() {
                narrator.on_finished();
            }
            let prompt = if session.current_answer().is_some() {
                "Enter para continuar, 'q' para salir: "
            } else {
                "Tu respuesta: "
            };
            write!(output, "{prompt}")?;
            output.flush()?;

            let Some(command) = read_command(input)? else {
                narrator.stop()?;
                return Ok(session.summary());
            };

            match command.to_lowercase().as_str() {
                "q" => {
                    narrator.stop()?;
                    return Ok(session.summary());
                }
                "p" if question.has_audio => {
                    if let Err(err) = narrator.play_question(&question) {
                        writeln!(output, "Error: {err}")?;
                    }
                }
                "z" if question.has_audio => {
                    if let Err(err) = toggle_pause(narrator) {
                        writeln!(output, "Error: {err}")?;
                    }
                }
                "s" if question.has_audio => narrator.stop()?,
                "" if session.current_answer().is_some() => break,
                "" => {}
                letter if session.current_answer().is_none() => {
                    match session.answer(&letter.to_uppercase()) {
                        Ok(feedback) => show_feedback(output, &feedback)?,
                        Err(err) => writeln!(output, "{err}")?,
                    }
                }
                _ => {}
            }
        }

        narrator.stop()?;
        if let Progress::Finished(summary) = session.advance() {
            return Ok(summary);
        }
    }
    Ok(session.summary())
}

/// Closing message for a finished session.
pub fn summary_message(summary: &SessionSummary) -> String {
    if summary.answered == summary.total {
        format!(
            "¡Has completado todas las preguntas! Aciertos: {}/{}",
            summary.correct, summary.total
        )
    } else {
        format!(
            "Sesión terminada. Respondidas: {}/{}, aciertos: {}",
            summary.answered, summary.total, summary.correct
        )
    }
}
