// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record};

use tagweave::app_config::LogLevel;
use tagweave::model::Alignment;
use tagweave::postprocess::Postprocessor;
use tagweave::projection_service::{AlignmentSpec, ProjectionService};
use tagweave::symmetrization::SymmetrizationStrategy;
use tagweave::{Preprocessor, Translation};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project the markup tags of a source sentence onto its translation
    Project {
        /// Source sentence, markup included
        #[arg(long)]
        sentence: String,

        /// Translated sentence, plain text
        #[arg(long)]
        translation: String,

        /// Word alignment in Pharaoh format, e.g. "0-0 1-2 2-1"
        #[arg(long)]
        alignment: String,

        /// Second (backward) alignment; requires --strategy
        #[arg(long)]
        backward: Option<String>,

        /// Symmetrization strategy merging the two alignments
        #[arg(long)]
        strategy: Option<String>,

        /// Source language code
        #[arg(long, default_value = "en")]
        source_lang: String,

        /// Target language code
        #[arg(long, default_value = "it")]
        target_lang: String,
    },

    /// Postprocess tab-separated "source<TAB>translation<TAB>alignment"
    /// lines from standard input
    Postprocess {
        /// Configuration file (JSON); command-line flags take precedence
        #[arg(long)]
        config: Option<std::path::PathBuf>,

        /// Target language code
        #[arg(long)]
        language: Option<String>,

        /// Source language code
        #[arg(long)]
        source_lang: Option<String>,

        /// Skip the detokenization stage
        #[arg(long)]
        no_detokenize: bool,

        /// Worker thread count (defaults to the hardware parallelism)
        #[arg(long)]
        workers: Option<usize>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "tagweave", version, about = "Markup tag projection for machine translation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: CliLogLevel,
}

/// Minimal logger writing level-prefixed lines to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let prefix = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN",
                Level::Info => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            eprintln!("[{}] {}", prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn init_logging(level: LogLevel) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level.to_level_filter());
    } else {
        log::set_max_level(LevelFilter::Off);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());

    match cli.command {
        Commands::Project {
            sentence,
            translation,
            alignment,
            backward,
            strategy,
            source_lang,
            target_lang,
        } => {
            let forward = Alignment::from_pharaoh(&alignment)?;
            let spec = match (backward, strategy) {
                (Some(backward), Some(strategy)) => AlignmentSpec::Directional {
                    forward,
                    backward: Alignment::from_pharaoh(&backward)?,
                    strategy: strategy.parse::<SymmetrizationStrategy>()?,
                },
                (Some(_), None) => {
                    return Err(anyhow!("--backward requires --strategy"));
                }
                (None, _) => AlignmentSpec::Merged(forward),
            };

            let service = ProjectionService::new(&source_lang, &target_lang);
            let projected = service.project(&sentence, &translation, spec)?;
            println!("{}", projected);
        }

        Commands::Postprocess {
            config,
            language,
            source_lang,
            no_detokenize,
            workers,
        } => {
            let config = match config {
                Some(path) => tagweave::Config::from_file(path)?,
                None => tagweave::Config::default(),
            };
            let language = language.unwrap_or_else(|| config.target_language.clone());
            let source_lang = source_lang.unwrap_or_else(|| config.source_language.clone());
            let workers = workers.unwrap_or_else(|| config.worker_threads());
            let detokenize = !no_detokenize && config.postprocess.detokenize;

            let postprocessor = Postprocessor::with_workers(&language, workers)?;
            let source_preprocessor = Preprocessor::new(&source_lang);

            let stdin = std::io::stdin();
            let mut batch = Vec::new();
            for line in stdin.lock().lines() {
                let line = line.context("Failed to read input line")?;
                if line.trim().is_empty() {
                    continue;
                }
                batch.push(parse_batch_line(&source_preprocessor, &line)?);
            }

            let results = postprocessor.process_batch(batch, detokenize).await?;
            let mut stdout = std::io::stdout().lock();
            for result in results {
                writeln!(stdout, "{}", result)?;
            }
        }
    }

    Ok(())
}

/// Parse one "source<TAB>translation<TAB>alignment" input line
fn parse_batch_line(preprocessor: &Preprocessor, line: &str) -> Result<Translation> {
    let mut fields = line.split('\t');
    let (Some(source_text), Some(target_text), Some(alignment_text)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(anyhow!(
            "Expected source<TAB>translation<TAB>alignment, got: {}",
            line
        ));
    };

    let source = preprocessor.process(source_text)?;
    let pieces: Vec<&str> = target_text.split_whitespace().collect();
    let last = pieces.len().saturating_sub(1);
    let target_words = pieces
        .iter()
        .enumerate()
        .map(|(i, piece)| tagweave::Word::new(*piece, (i < last).then_some(" ")))
        .collect();
    let alignment = Alignment::from_pharaoh(alignment_text)?;

    Ok(Translation::new(target_words, source, alignment))
}
