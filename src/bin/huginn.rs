//! huginn - classification CLI
//!
//! Operator interface for trying the classifier against the local model.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::LazyLock;

use clap::{Parser, Subcommand};
use huginn::classifier::magnitude;
use huginn::i18n::{self, ERROR_MODEL_UNAVAILABLE};
use huginn::{
    Config, LocalEmbeddingModel, LocaleCatalog, SemanticError, SemanticService, Taxonomy,
    Translator,
};
use serde_json::json;

static VERSION: LazyLock<String> = LazyLock::new(huginn::version_string);

/// Huginn CLI
#[derive(Parser)]
#[command(name = "huginn")]
#[command(version = VERSION.as_str())]
#[command(about = "Nearest-centroid intent and action classification")]
struct Args {
    /// Configuration file (default: ~/.huginn/config.toml, then /etc/huginn/config.toml)
    #[arg(short, long, env = "HUGINN_CONFIG")]
    config: Option<PathBuf>,

    /// Language for messages, e.g. "zh-CN" or an Accept-Language value
    #[arg(short, long, env = "HUGINN_LOCALE")]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized embedding of a text
    Embed {
        /// Text to embed (or omit to read from stdin)
        text: Option<String>,
    },

    /// Classify a text against the intent taxonomy
    Intent {
        /// Text to classify (or omit to read from stdin)
        text: Option<String>,
    },

    /// Classify a text against the action taxonomy
    Action {
        /// Text to classify (or omit to read from stdin)
        text: Option<String>,
    },

    /// Build and summarize the centroids of a taxonomy
    Centroids {
        /// "intent" or "action"
        taxonomy: Taxonomy,
    },

    /// List the supported local embedding models
    Models,
}

fn main() -> ExitCode {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("huginn: {e}");
            return ExitCode::FAILURE;
        }
    };

    let messages = LocaleCatalog::load(config.i18n.clone()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "translation catalog unavailable, printing message keys");
        LocaleCatalog::from_messages(&config.i18n.default_locale, Default::default())
    });
    let locale = messages.resolve_locale(args.locale.as_deref());

    match run(args.command, config, &messages, &locale) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_fatal() => {
            eprintln!("huginn: {}", messages.translate(ERROR_MODEL_UNAVAILABLE, &locale));
            eprintln!("huginn: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("huginn: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: Command,
    config: Config,
    messages: &LocaleCatalog,
    locale: &str,
) -> huginn::Result<()> {
    let start = || SemanticService::start(config.model.clone());

    let output = match command {
        Command::Models => {
            for model in LocalEmbeddingModel::ALL {
                let marker = if model.name() == config.model.name { "*" } else { " " };
                println!("{marker} {:<40} {:>4}", model.name(), model.dimensions());
            }
            return Ok(());
        }

        Command::Embed { text } => {
            let text = resolve_text(text, "embed")?;
            let embedding = start()?.embed(&text)?;
            json!({
                "dimensions": embedding.len(),
                "embedding": embedding,
            })
        }

        Command::Intent { text } => {
            let text = resolve_text(text, "intent")?;
            classification_json(start()?.classify_intent(&text)?, messages, locale)
        }

        Command::Action { text } => {
            let text = resolve_text(text, "action")?;
            classification_json(start()?.classify_action(&text)?, messages, locale)
        }

        Command::Centroids { taxonomy } => {
            let set = start()?.centroids_for(taxonomy)?;
            let categories: Vec<_> = set
                .iter()
                .map(|(name, centroid)| json!({ "name": name, "norm": magnitude(centroid) }))
                .collect();
            json!({
                "taxonomy": taxonomy,
                "dimensions": set.dimensions(),
                "categories": categories,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn classification_json(
    result: huginn::Classification,
    messages: &LocaleCatalog,
    locale: &str,
) -> serde_json::Value {
    let message = i18n::message_key(&result).map(|key| messages.translate(key, locale));
    json!({
        "label": result.label(),
        "score": result.score(),
        "result": result,
        "message": message,
    })
}

/// Resolve input text from argument and/or stdin.
///
/// - Arg only: use arg.
/// - Stdin only: use stdin (trimmed).
/// - Neither: error.
/// - Both: the argument wins; stdin is ignored.
fn resolve_text(arg: Option<String>, command: &str) -> huginn::Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let stdin_text = if io::stdin().is_terminal() {
        None
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| SemanticError::Configuration(format!("{command}: reading stdin: {e}")))?;
        Some(buf.trim().to_string()).filter(|s| !s.is_empty())
    };
    stdin_text.ok_or_else(|| {
        SemanticError::Configuration(format!(
            "{command}: no input provided (pass text as argument or via stdin)"
        ))
    })
}
