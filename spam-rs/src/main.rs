//! spam-rs: train and evaluate a Bayesian spam filter
//!
//! # Usage
//!
//! ```bash
//! # Train on corpus/train, evaluate on corpus/test
//! spam-rs run --root corpus
//!
//! # Same, as JSON
//! spam-rs run --root corpus --format json
//!
//! # Train on corpus/train and score arbitrary files
//! spam-rs classify --root corpus message1.eml message2.eml
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::spam::{
    ClassificationEngine, DirectorySource, DocumentOutcome, DocumentRef, DocumentSource,
    TestReport, TrainingSummary,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Train and evaluate a Bayesian spam filter", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on the corpus training set and evaluate on its test set
    Run {
        /// Corpus root containing train/ and test/
        #[arg(short, long)]
        root: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Override the spam threshold
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Train on the corpus training set and score the given files
    Classify {
        /// Corpus root containing train/
        #[arg(short, long)]
        root: PathBuf,
        /// Override the spam threshold
        #[arg(long)]
        threshold: Option<f64>,
        /// Files to score
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging);

    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Run {
            root,
            format,
            threshold,
        } => {
            apply_threshold(&mut config, threshold)?;
            let (engine, source, summary) = train(&config, &root)?;
            let report = engine.test(&source)?;

            match format {
                OutputFormat::Table => print_table(&report),
                OutputFormat::Json => print_json(&summary, &report)?,
            }
        }
        Commands::Classify {
            root,
            threshold,
            files,
        } => {
            apply_threshold(&mut config, threshold)?;
            let (engine, source, _) = train(&config, &root)?;

            println!("{:<40} {:<10} {:>12}", "File", "Predicted", "Spam Prob.");
            println!("{:-<64}", "");

            for path in files {
                let document = DocumentRef::new(path);
                match source.read(&document) {
                    Ok(text) => {
                        let probability = engine.score(&text)?;
                        println!(
                            "{:<40} {:<10} {:>12.5}",
                            document.name,
                            engine.predict(probability).to_string(),
                            probability
                        );
                    }
                    Err(e) => println!("{:<40} ✗ {}", document.name, e),
                }
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn apply_threshold(config: &mut Config, threshold: Option<f64>) -> anyhow::Result<()> {
    if let Some(threshold) = threshold {
        config.classifier.spam_threshold = threshold;
        config.classifier.validate()?;
    }
    Ok(())
}

fn train(
    config: &Config,
    root: &Path,
) -> anyhow::Result<(ClassificationEngine, DirectorySource, TrainingSummary)> {
    if !root.is_dir() {
        bail!("Corpus root {} is not a directory", root.display());
    }

    info!("Training from {}", root.display());
    let source = DirectorySource::new(root, config.corpus.clone());
    let mut engine = ClassificationEngine::new(config.classifier);
    let summary = engine.train(&source);

    Ok((engine, source, summary))
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.5}", v),
        None => "undefined".to_string(),
    }
}

fn print_table(report: &TestReport) {
    println!(
        "{:<40} {:<10} {:<10} {:>12}",
        "File", "Predicted", "Actual", "Spam Prob."
    );
    println!("{:-<75}", "");

    for result in &report.results {
        let note = match result.outcome() {
            DocumentOutcome::Scored => String::new(),
            DocumentOutcome::Unreadable { reason } => format!("  (unreadable: {})", reason),
        };
        println!(
            "{:<40} {:<10} {:<10} {:>12.5}{}",
            result.filename(),
            result.predicted_class().to_string(),
            result.actual_class().to_string(),
            result.spam_probability(),
            note
        );
    }

    println!("\nTotal: {} document(s)", report.counters.total);
    println!("Accuracy:  {}", format_stat(report.accuracy()));
    println!("Precision: {}", format_stat(report.precision()));
}

fn print_json(summary: &TrainingSummary, report: &TestReport) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "training": summary,
        "results": report.results,
        "counters": report.counters,
        "accuracy": report.accuracy(),
        "precision": report.precision(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
