//! CLI command definitions for study-helper.
//!
//! Three commands call the model (`summarize`, `quiz`, `homework`); `extract`
//! runs the extraction pipeline offline on a saved model reply.

use crate::config::{LlmSettings, StudyConfig};
use crate::error::StudyError;
use crate::extraction::{self, CanonicalItem, Strategy};
use crate::llm::OpenAiClient;
use crate::study::StudyAssistant;
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Study helper: summaries, quizzes and homework answers from an LLM.
#[derive(Parser)]
#[command(name = "study-helper")]
#[command(about = "Summarize text, generate quizzes and answer homework questions with an LLM")]
#[command(version)]
#[command(
    long_about = "study-helper forwards study requests to an OpenAI-compatible API and reshapes the replies.\n\nExample usage:\n  study-helper quiz --topic \"the French revolution\" --questions 5 --json"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Model to use (overrides STUDY_HELPER_MODEL).
    #[arg(short, long, global = true, env = "STUDY_HELPER_MODEL")]
    pub model: Option<String>,

    /// API key for the chat-completions endpoint.
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(long, global = true, env = "OPENAI_API_BASE")]
    pub api_base: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "STUDY_HELPER_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Print JSON instead of human-readable text.
    #[arg(short = 'j', long, global = true)]
    pub json: bool,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Summarize a piece of text in a few sentences.
    Summarize(SummarizeArgs),

    /// Generate a multiple-choice quiz on a topic.
    Quiz(QuizArgs),

    /// Answer a homework question (final answer only).
    Homework(HomeworkArgs),

    /// Extract quiz items from a saved model reply, without calling the model.
    Extract(ExtractArgs),
}

/// Arguments for `study-helper summarize`.
#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Text to summarize.
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File to summarize. Reads stdin when neither --text nor --file is given.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Arguments for `study-helper quiz`.
#[derive(Parser, Debug)]
pub struct QuizArgs {
    /// Quiz topic.
    #[arg(short, long)]
    pub topic: String,

    /// Number of questions to request (overrides STUDY_HELPER_QUIZ_QUESTIONS).
    #[arg(short = 'n', long)]
    pub questions: Option<usize>,
}

/// Arguments for `study-helper homework`.
#[derive(Parser, Debug)]
pub struct HomeworkArgs {
    /// The homework question.
    #[arg(short, long)]
    pub question: String,
}

/// Arguments for `study-helper extract`.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// File holding the raw model reply. Reads stdin when omitted.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Keep only complete four-option questions and fail if none remain.
    #[arg(long)]
    pub quiz: bool,
}

/// Result of the offline `extract` command.
#[derive(Debug, Serialize)]
pub struct ExtractReport {
    /// Extraction strategy that found the payload.
    pub strategy: String,
    /// Items normalized from the payload.
    pub items: Vec<CanonicalItem>,
}

/// Parse CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Summarize(args) => {
            let text = read_input(args.text.as_deref(), args.file.as_deref())?;
            let summary = build_assistant(&cli, None)?.summarize(&text).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.summary);
            }
        }
        Commands::Quiz(args) => {
            let quiz = build_assistant(&cli, args.questions)?
                .quiz(&args.topic)
                .await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&quiz)?);
            } else {
                print_items(&quiz.questions);
            }
        }
        Commands::Homework(args) => {
            let answer = build_assistant(&cli, None)?.homework(&args.question).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                println!("{}", answer.answer);
            }
        }
        Commands::Extract(args) => {
            let text = read_input(None, args.file.as_deref())?;
            let report = extract_report(&text, args.quiz)?;
            info!(
                strategy = %report.strategy,
                items = report.items.len(),
                "Extracted items"
            );
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_items(&report.items);
            }
        }
    }
    Ok(())
}

/// Builds the assistant from CLI flags, falling back to environment variables.
fn build_assistant(cli: &Cli, questions: Option<usize>) -> anyhow::Result<StudyAssistant> {
    let settings = llm_settings(cli)?;

    let mut config = StudyConfig::from_env().context("Invalid study configuration")?;
    if let Some(count) = questions {
        config = config.with_quiz_questions(count);
        config.validate()?;
    }

    info!(model = %settings.model, api_base = %settings.api_base, "Using LLM endpoint");
    let client = OpenAiClient::new(&settings)?;
    Ok(StudyAssistant::new(Arc::new(client), config))
}

/// Resolves connection settings. Flags already carry their env fallbacks.
fn llm_settings(cli: &Cli) -> anyhow::Result<LlmSettings> {
    let mut settings = LlmSettings::from_vars(|key| match key {
        "OPENAI_API_KEY" => cli.api_key.clone(),
        "OPENAI_API_BASE" => cli.api_base.clone(),
        _ => None,
    })
    .context("Invalid LLM settings (pass --api-key or set OPENAI_API_KEY)")?;

    if let Some(model) = &cli.model {
        settings = settings.with_model(model.as_str());
    }
    if let Some(secs) = cli.timeout {
        settings = settings.with_timeout(Duration::from_secs(secs));
    }
    settings.validate()?;
    Ok(settings)
}

/// Runs the extraction pipeline on a raw reply.
pub fn extract_report(text: &str, quiz: bool) -> anyhow::Result<ExtractReport> {
    let found = extraction::extract_with_strategy(text)
        .context("Failed to parse output: no JSON payload found")?;

    let mut items = extraction::normalize_all(&found.value);
    if quiz {
        items = extraction::filter_valid(items);
        if items.is_empty() {
            return Err(StudyError::NoValidItems("questions".to_string()).into());
        }
    }

    let strategy = match found.strategy {
        Strategy::Whole => "whole",
        Strategy::ArrayRegion => "array_region",
        Strategy::ObjectRegion => "object_region",
    };

    Ok(ExtractReport {
        strategy: strategy.to_string(),
        items,
    })
}

/// Reads input from inline text, a file, or stdin, in that order.
fn read_input(text: Option<&str>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    if let Some(path) = file {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn print_items(items: &[CanonicalItem]) {
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, item.question);
        for option in &item.options {
            println!("   - {}", option);
        }
        if let Some(answer) = &item.answer {
            println!("   Answer: {}", answer);
        }
        if !item.explanation.is_empty() {
            println!("   Why: {}", item.explanation);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quiz_command() {
        let args = vec!["study-helper", "quiz", "--topic", "volcanoes", "-n", "3", "--json"];
        let cli = Cli::try_parse_from(args).expect("should parse");
        assert!(cli.json);
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Commands::Quiz(args) => {
                assert_eq!(args.topic, "volcanoes");
                assert_eq!(args.questions, Some(3));
            }
            _ => panic!("Expected Quiz command"),
        }
    }

    #[test]
    fn test_summarize_text_and_file_conflict() {
        let args = vec![
            "study-helper",
            "summarize",
            "--text",
            "abc",
            "--file",
            "notes.txt",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_llm_settings_from_flags() {
        let args = vec![
            "study-helper",
            "--api-key",
            "sk-test",
            "--api-base",
            "http://localhost:4000",
            "--model",
            "gpt-4o",
            "--timeout",
            "15",
            "homework",
            "--question",
            "Why?",
        ];
        let cli = Cli::try_parse_from(args).expect("should parse");
        let settings = llm_settings(&cli).expect("valid settings");
        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.api_base, "http://localhost:4000");
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.timeout, Duration::from_secs(15));
        assert!(build_assistant(&cli, Some(3)).is_ok());
    }

    #[test]
    fn test_llm_settings_rejects_zero_timeout() {
        let args = vec![
            "study-helper",
            "--api-key",
            "sk-test",
            "--api-base",
            "http://localhost:4000",
            "--timeout",
            "0",
            "homework",
            "--question",
            "Why?",
        ];
        let cli = Cli::try_parse_from(args).expect("should parse");
        let err = llm_settings(&cli).unwrap_err();
        assert!(err.downcast_ref::<crate::config::ConfigError>().is_some());
    }

    #[test]
    fn test_extract_command() {
        let args = vec!["study-helper", "extract", "--file", "reply.txt", "--quiz"];
        let cli = Cli::try_parse_from(args).expect("should parse");
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.file, Some(PathBuf::from("reply.txt")));
                assert!(args.quiz);
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_extract_report_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "Here you go:\n[{{\"q\": \"2+2?\", \"A\": \"3\", \"B\": \"4\", \"C\": \"5\", \"D\": \"6\", \"correct\": \"B\"}}]\n"
        )
        .expect("write");

        let text = read_input(None, Some(file.path())).expect("read");
        let report = extract_report(&text, true).expect("extracts");
        assert_eq!(report.strategy, "array_region");
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].answer.as_deref(), Some("B. 4"));
    }

    #[test]
    fn test_extract_report_failures() {
        let err = extract_report("nothing structured here", false).unwrap_err();
        assert!(err.to_string().contains("no JSON payload"));

        let err = extract_report(r#"[{"question": "Q", "options": ["a"]}]"#, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StudyError>(),
            Some(StudyError::NoValidItems(_))
        ));
    }

    #[test]
    fn test_read_input_prefers_text() {
        let text = read_input(Some("inline"), Some(Path::new("/does/not/exist"))).expect("read");
        assert_eq!(text, "inline");
        assert!(read_input(None, Some(Path::new("/does/not/exist"))).is_err());
    }
}
