pub mod config;
pub mod engine;
pub mod error;
pub mod quiz;
pub mod source;

use std::io::{self, Write};

use clap::Parser;
use quiz_core::{load_question_set_with, DialogueQuestionGenerator, Narrator, QuizSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{intent_selection, source_kind, Cli, Command, Settings};
use crate::engine::Engine;
use crate::source::{ContentSource, LocalSource};

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let settings = Settings::from_cli(&cli)?;
    let source = LocalSource::new(&settings.content_root);
    tracing::debug!(root = %source.root().display(), "using local content source");

    match cli.command {
        Command::Browse { path } => browse(&source, path.as_deref().unwrap_or("")),
        Command::Parse {
            file,
            audio,
            random_intent,
        } => {
            let generator = DialogueQuestionGenerator::new(intent_selection(random_intent));
            let text = source.fetch(&file)?;
            let set = load_question_set_with(
                &text,
                source_kind(audio),
                &generator,
                &mut rand::thread_rng(),
            );
            if set.is_empty() {
                tracing::warn!(%file, "no valid questions found");
            }
            println!("{}", serde_json::to_string_pretty(&set)?);
            Ok(())
        }
        Command::Play {
            file,
            audio,
            random_intent,
        } => play(&source, &settings, file, audio, random_intent),
    }
}

fn browse(source: &LocalSource, path: &str) -> anyhow::Result<()> {
    let entries = source.list(path)?;
    let title = if path.is_empty() { "Repositorio raíz" } else { path };
    println!("{title}");
    for entry in entries {
        println!("  {} {}", entry.icon(), entry.path);
    }
    Ok(())
}

fn play(
    source: &LocalSource,
    settings: &Settings,
    file: Option<String>,
    audio: bool,
    random_intent: bool,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let file = match file {
        Some(file) => file,
        None => match quiz::select_file(source, &mut input, &mut output)? {
            Some(file) => file,
            None => return Ok(()),
        },
    };

    let text = source.fetch(&file)?;
    let generator = DialogueQuestionGenerator::new(intent_selection(random_intent));
    let set = load_question_set_with(&text, source_kind(audio), &generator, &mut rand::thread_rng());
    if set.is_empty() {
        writeln!(output, "Sin preguntas válidas")?;
        return Ok(());
    }
    tracing::info!(%file, questions = set.len(), "starting quiz");

    let mut session = QuizSession::new(set);
    let mut narrator = Narrator::new(Engine::from_settings(settings)?, settings.language.clone());
    let summary = quiz::run_quiz(&mut session, &mut narrator, &mut input, &mut output)?;
    writeln!(output, "\n{}", quiz::summary_message(&summary))?;
    Ok(())
}
