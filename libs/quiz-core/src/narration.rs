//! Narration state machine.
//!
//! The speech engine itself is a collaborator behind [`NarrationEngine`];
//! [`Narrator`] tracks playback status and drives the engine. Engines report
//! completion or failure through [`Narrator::on_finished`] and
//! [`Narrator::on_error`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conversation::clean_for_narration;
use crate::error::{QuizError, Result};
use crate::types::Question;

/// Default narration language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Playback status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "message")]
pub enum NarrationStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Error(String),
}

impl fmt::Display for NarrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Playing => write!(f, "playing"),
            Self::Paused => write!(f, "paused"),
            Self::Error(message) => write!(f, "failed ({message})"),
        }
    }
}

/// A text-to-speech backend.
pub trait NarrationEngine {
    fn speak(&mut self, text: &str, language: &str) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// Drives a [`NarrationEngine`] through Idle / Playing / Paused / Error.
pub struct Narrator<E> {
    engine: E,
    language: String,
    status: NarrationStatus,
}

impl<E: NarrationEngine> Narrator<E> {
    pub fn new(engine: E, language: impl Into<String>) -> Self {
        Self {
            engine,
            language: language.into(),
            status: NarrationStatus::Idle,
        }
    }

    pub fn status(&self) -> &NarrationStatus {
        &self.status
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Stop whatever is playing and start narrating `text`.
    ///
    /// The text is reduced to its dialogue (or stripped of quiz markup)
    /// before reaching the engine.
    pub fn play(&mut self, text: &str) -> Result<()> {
        self.stop()?;

        let clean = clean_for_narration(text);
        if clean.trim().is_empty() {
            return Err(QuizError::EmptyNarration);
        }

        if let Err(err) = self.engine.speak(&clean, &self.language) {
            self.status = NarrationStatus::Error(err.to_string());
            return Err(err);
        }
        tracing::info!(language = %self.language, "narration started");
        self.status = NarrationStatus::Playing;
        Ok(())
    }

    /// Narrate a question's audio text.
    pub fn play_question(&mut self, question: &Question) -> Result<()> {
        self.play(question.narration_text())
    }

    pub fn pause(&mut self) -> Result<()> {
        if self.status != NarrationStatus::Playing {
            return Err(self.invalid("pause"));
        }
        self.engine.pause()?;
        tracing::info!("narration paused");
        self.status = NarrationStatus::Paused;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        if self.status != NarrationStatus::Paused {
            return Err(self.invalid("resume"));
        }
        self.engine.resume()?;
        tracing::info!("narration resumed");
        self.status = NarrationStatus::Playing;
        Ok(())
    }

    /// Stop from any state, ending in Idle.
    pub fn stop(&mut self) -> Result<()> {
        if matches!(
            self.status,
            NarrationStatus::Playing | NarrationStatus::Paused
        ) {
            self.engine.stop()?;
            tracing::info!("narration stopped");
        }
        self.status = NarrationStatus::Idle;
        Ok(())
    }

    /// Engine callback: playback reached the end.
    pub fn on_finished(&mut self) {
        if matches!(
            self.status,
            NarrationStatus::Playing | NarrationStatus::Paused
        ) {
            tracing::info!("narration completed");
            self.status = NarrationStatus::Idle;
        }
    }

    /// Engine callback: playback failed.
    pub fn on_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "narration failed");
        self.status = NarrationStatus::Error(message);
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            status: self.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingEngine {
        calls: Vec<String>,
        fail_speak: bool,
    }

    impl NarrationEngine for RecordingEngine {
        fn speak(&mut self, text: &str, language: &str) -> Result<()> {
            if self.fail_speak {
                return Err(QuizError::Engine("no voices".to_string()));
            }
            self.calls.push(format!("speak[{language}] {text}"));
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.calls.push("pause".to_string());
            Ok(())
        }

        fn resume(&mut self) -> Result<()> {
            self.calls.push("resume".to_string());
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.calls.push("stop".to_string());
            Ok(())
        }
    }

    fn narrator() -> Narrator<RecordingEngine> {
        Narrator::new(RecordingEngine::default(), DEFAULT_LANGUAGE)
    }

    #[test]
    fn full_playback_cycle() {
        let mut n = narrator();
        n.play("Listen:\nA: Hi\nB: Hello\nA. option").unwrap();
        assert_eq!(n.status(), &NarrationStatus::Playing);

        n.pause().unwrap();
        assert_eq!(n.status(), &NarrationStatus::Paused);
        n.resume().unwrap();
        n.on_finished();
        assert_eq!(n.status(), &NarrationStatus::Idle);

        assert_eq!(
            n.engine().calls,
            vec![
                "speak[en-US] A: Hi\nB: Hello".to_string(),
                "pause".to_string(),
                "resume".to_string(),
            ]
        );
    }

    #[test]
    fn play_stops_current_playback_first() {
        let mut n = narrator();
        n.play("A: one").unwrap();
        n.play("B: two").unwrap();
        assert_eq!(
            n.engine().calls,
            vec![
                "speak[en-US] A: one".to_string(),
                "stop".to_string(),
                "speak[en-US] B: two".to_string(),
            ]
        );
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let mut n = narrator();
        assert_eq!(
            n.pause(),
            Err(QuizError::InvalidTransition {
                action: "pause",
                status: NarrationStatus::Idle
            })
        );
        n.play("A: hi").unwrap();
        assert!(matches!(n.resume(), Err(QuizError::InvalidTransition { .. })));
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut n = narrator();
        assert_eq!(n.play("  \n "), Err(QuizError::EmptyNarration));
        assert_eq!(n.status(), &NarrationStatus::Idle);
    }

    #[test]
    fn engine_failure_moves_to_error() {
        let mut n = Narrator::new(
            RecordingEngine {
                fail_speak: true,
                ..Default::default()
            },
            "es-ES",
        );
        assert!(n.play("A: hola").is_err());
        assert_eq!(
            n.status(),
            &NarrationStatus::Error("narration engine error: no voices".to_string())
        );

        n.stop().unwrap();
        assert_eq!(n.status(), &NarrationStatus::Idle);
    }

    #[test]
    fn error_callback_is_observable() {
        let mut n = narrator();
        n.play("A: hi").unwrap();
        n.on_error("device lost");
        assert_eq!(n.status().to_string(), "failed (device lost)");
    }
}
