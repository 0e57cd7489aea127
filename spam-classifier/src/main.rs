//! CLI for training the spam classifier and checking documents
//!
//! # Usage
//!
//! ```bash
//! # Classify files against a labeled corpus
//! spam-classifier classify --spam corpus/spam --ham corpus/ham.mbox inbox/
//!
//! # Print only the documents that pass the filter
//! spam-classifier filter --spam corpus/spam --ham corpus/ham import.mbox
//!
//! # Show training statistics and the spammiest words
//! spam-classifier --config spam.toml stats --top 25
//! ```

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use spam_classifier::config::{Config, LoggingConfig};
use spam_classifier::corpus::{load_documents, Document};
use spam_classifier::spam::{Category, FilterStats, SpamFilter, Verdict};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-classifier")]
#[command(about = "Train a naive-Bayes spam filter and classify documents", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Known spam (directory or mbox file), overrides [corpus].spam
    #[arg(long)]
    spam: Option<PathBuf>,
    /// Known ham (directory or mbox file), overrides [corpus].ham
    #[arg(long)]
    ham: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a verdict for every input document
    Classify {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Emit one JSON object per document
        #[arg(long)]
        json: bool,
        /// Files, directories or mbox archives to classify
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print the sources of documents that are not spam
    Filter {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Files, directories or mbox archives to filter
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print training statistics and the spammiest words as JSON
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Number of words to list
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
}

#[derive(Serialize)]
struct ClassifiedDocument<'a> {
    source: &'a str,
    #[serde(flatten)]
    verdict: Verdict,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: FilterStats,
    most_spammy: Vec<SpammyToken<'a>>,
}

#[derive(Serialize)]
struct SpammyToken<'a> {
    token: &'a str,
    spamicity: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    init_logging(&config.logging);
    info!("Starting spam-classifier v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Classify { corpus, json, inputs } => {
            let filter = build_filter(&config, &corpus).await?;

            for document in load_inputs(&inputs)? {
                let verdict = filter.score(&document.text).await;

                if json {
                    let line = ClassifiedDocument {
                        source: &document.source,
                        verdict,
                    };
                    println!("{}", serde_json::to_string(&line)?);
                } else {
                    let label = if verdict.is_spam { "SPAM" } else { "HAM" };
                    let probability = verdict
                        .combined_probability
                        .map(|p| format!("{:.4}", p))
                        .unwrap_or_else(|| "-".to_string());
                    println!("{:<4} {:>8}  {}", label, probability, document.source);
                }
            }
        }
        Commands::Filter { corpus, inputs } => {
            let filter = build_filter(&config, &corpus).await?;
            let documents = load_inputs(&inputs)?;
            let total = documents.len();

            let kept = filter.filter(documents).await;
            for document in &kept {
                println!("{}", document.source);
            }

            eprintln!("{} of {} document(s) passed the filter", kept.len(), total);
        }
        Commands::Stats { corpus, top } => {
            let filter = build_filter(&config, &corpus).await?;
            let table = filter.snapshot().await;

            let report = StatsReport {
                stats: filter.stats().await,
                most_spammy: table
                    .most_spammy(top)
                    .into_iter()
                    .map(|(token, spamicity)| SpammyToken { token, spamicity })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spam_classifier={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    // Results go to stdout, logs to stderr
    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        "compact" => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
}

/// Train on both corpora and summarize
async fn build_filter(config: &Config, args: &CorpusArgs) -> anyhow::Result<SpamFilter> {
    let filter = SpamFilter::new(config.classifier.clone())?;

    for (category, cli_path, config_path) in [
        (Category::Spam, &args.spam, &config.corpus.spam),
        (Category::Ham, &args.ham, &config.corpus.ham),
    ] {
        let Some(path) = cli_path.as_ref().or(config_path.as_ref()) else {
            bail!(
                "No {} corpus configured; pass --{} or set [corpus].{}",
                category,
                category,
                category
            );
        };

        let documents = load_documents(path)
            .with_context(|| format!("Failed to load {} corpus", category))?;
        filter.train_all(category, documents).await;
    }

    filter.summarize().await;
    Ok(filter)
}

fn load_inputs(inputs: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();
    for input in inputs {
        documents.extend(load_documents(input)?);
    }
    Ok(documents)
}
