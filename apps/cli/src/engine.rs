//! Narration engines available to the terminal front-end.

use std::process::{Child, Command, Stdio};

use quiz_core::{NarrationEngine, QuizError, Result};

use crate::config::Settings;

/// Engines whose playback can be polled for completion.
pub trait PollFinished {
    /// Returns true once when the current playback has ended on its own.
    fn poll_finished(&mut self) -> bool;
}

/// Writes narration to the log instead of speaking it.
#[derive(Debug, Default)]
pub struct LogEngine {
    speaking: bool,
}

impl NarrationEngine for LogEngine {
    fn speak(&mut self, text: &str, language: &str) -> Result<()> {
        tracing::info!(%language, "narrating:\n{text}");
        self.speaking = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.speaking = false;
        Ok(())
    }
}

impl PollFinished for LogEngine {
    fn poll_finished(&mut self) -> bool {
        std::mem::take(&mut self.speaking)
    }
}

/// Spawns an external speech program per utterance.
///
/// The command template is split on whitespace; `{lang}` and `{rate}` are
/// substituted and the text is appended as the last argument.
#[derive(Debug)]
pub struct CommandEngine {
    template: Vec<String>,
    rate: f32,
    child: Option<Child>,
}

impl CommandEngine {
    pub fn new(template: &str, rate: f32) -> Result<Self> {
        let template: Vec<String> = template.split_whitespace().map(str::to_string).collect();
        if template.is_empty() {
            return Err(QuizError::Engine("empty speech command".to_string()));
        }
        Ok(Self {
            template,
            rate,
            child: None,
        })
    }

    /// Program and arguments for one utterance.
    pub fn build_args(&self, text: &str, language: &str) -> Vec<String> {
        let rate = self.rate.to_string();
        self.template
            .iter()
            .map(|part| part.replace("{lang}", language).replace("{rate}", &rate))
            .chain(std::iter::once(text.to_string()))
            .collect()
    }
}

impl NarrationEngine for CommandEngine {
    fn speak(&mut self, text: &str, language: &str) -> Result<()> {
        // A previous utterance may still be running if the narrator lost track of it.
        self.stop()?;
        let args = self.build_args(text, language);
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| QuizError::Engine("empty speech command".to_string()))?;
        let child = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| QuizError::Engine(format!("failed to start {program}: {e}")))?;
        tracing::debug!(pid = child.id(), %program, "speech process started");
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Err(QuizError::Engine(
            "pausing is not supported by external speech commands".to_string(),
        ))
    }

    fn resume(&mut self) -> Result<()> {
        Err(QuizError::Engine(
            "resuming is not supported by external speech commands".to_string(),
        ))
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            // The process may already have exited.
            let _ = child.kill();
            let _ = child.wait();
        }
        Ok(())
    }
}

impl PollFinished for CommandEngine {
    fn poll_finished(&mut self) -> bool {
        let done = match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(Some(_)) | Err(_)),
            None => false,
        };
        if done {
            self.child = None;
        }
        done
    }
}

/// Engine picked from configuration.
#[derive(Debug)]
pub enum Engine {
    Log(LogEngine),
    Command(CommandEngine),
}

impl Engine {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match settings.tts_command.as_deref() {
            Some(template) => Ok(Self::Command(CommandEngine::new(
                template,
                settings.speech_rate,
            )?)),
            None => Ok(Self::Log(LogEngine::default())),
        }
    }
}

impl NarrationEngine for Engine {
    fn speak(&mut self, text: &str, language: &str) -> Result<()> {
        match self {
            Self::Log(e) => e.speak(text, language),
            Self::Command(e) => e.speak(text, language),
        }
    }

    fn pause(&mut self) -> Result<()> {
        match self {
            Self::Log(e) => e.pause(),
            Self::Command(e) => e.pause(),
        }
    }

    fn resume(&mut self) -> Result<()> {
        match self {
            Self::Log(e) => e.resume(),
            Self::Command(e) => e.resume(),
        }
    }

    fn stop(&mut self) -> Result<()> {
        match self {
            Self::Log(e) => e.stop(),
            Self::Command(e) => e.stop(),
        }
    }
}

impl PollFinished for Engine {
    fn poll_finished(&mut self) -> bool {
        match self {
            Self::Log(e) => e.poll_finished(),
            Self::Command(e) => e.poll_finished(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn command_template_substitution() {
        let engine = CommandEngine::new("espeak -v {lang} --rate={rate}", 0.8).unwrap();
        assert_eq!(
            engine.build_args("A: Hi", "en-US"),
            vec!["espeak", "-v", "en-US", "--rate=0.8", "A: Hi"]
        );
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(CommandEngine::new("   ", 1.0).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn speaking_again_reaps_the_previous_process() {
        let mut engine = CommandEngine::new("sleep", 1.0).unwrap();
        engine.speak("30", "en-US").unwrap();
        let first = engine.child.as_ref().map(Child::id).unwrap();

        engine.speak("30", "en-US").unwrap();
        let second = engine.child.as_ref().map(Child::id).unwrap();
        assert_ne!(first, second);
        assert!(!PathBuf::from(format!("/proc/{first}")).exists());

        engine.stop().unwrap();
        assert!(engine.child.is_none());
    }

    #[test]
    fn log_engine_finishes_after_speaking() {
        let mut engine = LogEngine::default();
        assert!(!engine.poll_finished());
        engine.speak("A: Hi", "en-US").unwrap();
        assert!(engine.poll_finished());
        assert!(!engine.poll_finished());
    }

    #[test]
    fn settings_select_engine() {
        let mut settings = Settings {
            content_root: PathBuf::from("."),
            language: "en-US".to_string(),
            tts_command: None,
            speech_rate: 0.8,
        };
        assert!(matches!(Engine::from_settings(&settings), Ok(Engine::Log(_))));
        settings.tts_command = Some("say".to_string());
        assert!(matches!(
            Engine::from_settings(&settings),
            Ok(Engine::Command(_))
        ));
    }
}
