//! Command-line and environment configuration.
//!
//! Values come from flags, then `FASTLEARN_*` environment variables (a `.env`
//! file is loaded first), then defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quiz_core::{IntentSelection, SourceKind, DEFAULT_LANGUAGE};

use crate::error::{CliError, Result};

/// FastLearn terminal quiz
#[derive(Debug, Parser)]
#[command(name = "fastlearn", author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding quiz documents
    #[arg(long, env = "FASTLEARN_CONTENT_ROOT", default_value = ".", global = true)]
    pub content_root: PathBuf,

    /// Narration language
    #[arg(long, env = "FASTLEARN_LANGUAGE", default_value = DEFAULT_LANGUAGE, global = true)]
    pub language: String,

    /// External speech command, e.g. "espeak -v {lang}"; the text is passed last
    #[arg(long, env = "FASTLEARN_TTS_COMMAND", global = true)]
    pub tts_command: Option<String>,

    /// Speech rate handed to the speech command as {rate}
    #[arg(long, env = "FASTLEARN_SPEECH_RATE", default_value_t = 0.8, global = true)]
    pub speech_rate: f32,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a directory of the content root
    Browse {
        /// Directory relative to the content root
        path: Option<String>,
    },
    /// Parse a document and print its questions as JSON
    Parse {
        /// File relative to the content root
        file: String,
        /// Treat the document as a listening exercise
        #[arg(long)]
        audio: bool,
        /// Pick randomly among matching question kinds for generated questions
        #[arg(long)]
        random_intent: bool,
    },
    /// Run an interactive quiz
    Play {
        /// File relative to the content root; browse interactively when omitted
        file: Option<String>,
        /// Treat the document as a listening exercise
        #[arg(long)]
        audio: bool,
        /// Pick randomly among matching question kinds for generated questions
        #[arg(long)]
        random_intent: bool,
    },
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub content_root: PathBuf,
    pub language: String,
    pub tts_command: Option<String>,
    pub speech_rate: f32,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if !(cli.speech_rate > 0.0 && cli.speech_rate <= 10.0) {
            return Err(CliError::Config(format!(
                "speech rate must be in (0, 10], got {}",
                cli.speech_rate
            )));
        }
        if cli.language.trim().is_empty() {
            return Err(CliError::Config("language must not be empty".to_string()));
        }
        let tts_command = cli
            .tts_command
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(Self {
            content_root: cli.content_root.clone(),
            language: cli.language.trim().to_string(),
            tts_command,
            speech_rate: cli.speech_rate,
        })
    }
}

pub fn source_kind(audio: bool) -> SourceKind {
    if audio {
        SourceKind::Audio
    } else {
        SourceKind::Plain
    }
}

pub fn intent_selection(random: bool) -> IntentSelection {
    if random {
        IntentSelection::Random
    } else {
        IntentSelection::FirstMatch
    }
}
