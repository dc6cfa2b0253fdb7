//! clarity: command-line front end for Clarity Notes.
//!
//! Every command reads its input from `--input <file>` or stdin and prints a
//! JSON document on stdout. Logs go to stderr (or `LOG_FILE`).

mod commands;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clarity_core::AnalysisConfig;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{
    cmd_annotate, cmd_decrypt, cmd_encrypt, cmd_glossary, cmd_insights, cmd_lock, cmd_plain,
    cmd_summarize, cmd_tags, cmd_unlock,
};

#[derive(Parser)]
#[command(name = "clarity")]
#[command(author, version, about = "Summaries, tags, glossary and encryption for notes")]
#[command(propagate_version = true)]
struct Cli {
    /// Analysis config file (default: ~/.config/clarity-notes/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct PasswordArgs {
    /// Password (prefer the environment variable over the flag)
    #[arg(short, long, env = "CLARITY_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text from HTML
    Plain {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Extractive summary of HTML content
    Summarize {
        #[command(flatten)]
        input: InputArgs,

        /// Sentences to keep (default: from config)
        #[arg(short, long)]
        sentences: Option<usize>,
    },

    /// Suggest tags for HTML content
    Tags {
        #[command(flatten)]
        input: InputArgs,

        /// Number of tags (default: from config)
        #[arg(short, long)]
        count: Option<usize>,
    },

    /// Build a glossary of frequent long words
    Glossary {
        #[command(flatten)]
        input: InputArgs,

        /// Maximum number of terms (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Wrap glossary terms and grammar issues in annotation spans
    Annotate {
        #[command(flatten)]
        input: InputArgs,

        /// Maximum number of extracted terms (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Glossary JSON file ([{"term": ..., "definition": ...}]) instead of extraction
        #[arg(short, long)]
        glossary: Option<PathBuf>,

        /// Skip the grammar pass
        #[arg(long)]
        no_grammar: bool,
    },

    /// Plain text, summary, tags, glossary and key points in one document
    Insights {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Encrypt text into a {iv, salt, data} blob
    Encrypt {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Decrypt a {iv, salt, data} blob
    Decrypt {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Lock a note JSON document
    Lock {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Unlock a note JSON document
    Unlock {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        password: PasswordArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let _file_guard = init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "clarity=info")
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clarity=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let guard = if let Some(ref path) = log_file {
        let file_dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let file_name = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("clarity.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // stdout carries the command output, so console logs go to stderr
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    debug!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Plain { input } => cmd_plain(&read_input(&input)?),
        Commands::Summarize { input, sentences } => cmd_summarize(
            &read_input(&input)?,
            sentences.unwrap_or(config.summary_sentences),
        )?,
        Commands::Tags { input, count } => {
            cmd_tags(&read_input(&input)?, count.unwrap_or(config.tag_count))
        }
        Commands::Glossary { input, limit } => {
            cmd_glossary(&read_input(&input)?, limit.unwrap_or(config.glossary_limit))
        }
        Commands::Annotate {
            input,
            limit,
            glossary,
            no_grammar,
        } => {
            let glossary = glossary
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))
                })
                .transpose()?;
            cmd_annotate(
                &read_input(&input)?,
                limit.unwrap_or(config.glossary_limit),
                glossary.as_deref(),
                !no_grammar,
            )?
        }
        Commands::Insights { input } => cmd_insights(&read_input(&input)?, &config)?,
        Commands::Encrypt { input, password } => {
            cmd_encrypt(read_input(&input)?, password.password).await?
        }
        Commands::Decrypt { input, password } => {
            cmd_decrypt(&read_input(&input)?, password.password).await?
        }
        Commands::Lock { input, password } => {
            cmd_lock(&read_input(&input)?, password.password).await?
        }
        Commands::Unlock { input, password } => {
            cmd_unlock(&read_input(&input)?, password.password).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let config = match path {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AnalysisConfig::load()?,
    };
    debug!(
        summary_sentences = config.summary_sentences,
        tag_count = config.tag_count,
        glossary_limit = config.glossary_limit,
        "Analysis config loaded"
    );
    Ok(config)
}

fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
