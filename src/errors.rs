/*!
 * Error types for the tagweave library.
 *
 * This module contains custom error types for the different parts of the
 * library, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised while resolving configuration values
//
// NOTE: `Display`/`Error` are hand-written below rather than derived via
// thiserror. thiserror unconditionally treats a struct field named `source`
// as the error's `source()` (requiring it to be `std::error::Error`), and the
// spec mandates the field be named `source` on `LanguageNotSupported` while
// holding a plain language-code `String`. The hand-written impls reproduce
// exactly what the `#[error("...")]` attributes below describe.
#[derive(Debug)]
pub enum ConfigError {
    /// Unknown symmetrization strategy identifier
    InvalidStrategy(String),

    /// Worker thread count must be a positive integer
    InvalidWorkerCount(usize),

    /// The requested language pair is not handled by this engine
    LanguageNotSupported {
        /// Requested source language code
        source: String,
        /// Requested target language code
        target: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidStrategy(name) => {
                write!(f, "Invalid symmetrization strategy name: {name}")
            }
            ConfigError::InvalidWorkerCount(count) => {
                write!(f, "Invalid worker thread count: {count}")
            }
            ConfigError::LanguageNotSupported { source, target } => {
                write!(f, "Language pair not supported: {source} -> {target}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the tag projection engine
#[derive(Error, Debug)]
pub enum ProjectionError {
    /// Projection was requested for a tagged source and a worded target,
    /// but the translation carries no word alignment
    #[error("Translation has no word alignment")]
    MissingAlignment,

    /// A tag position fell outside the word-gap range of its sentence.
    /// This is a defect in the caller's data, not a recoverable condition.
    #[error("Tag position {position} out of range for {word_count} words")]
    InvalidTagPosition {
        /// Offending gap position
        position: usize,
        /// Number of words in the sentence
        word_count: usize,
    },

    /// An alignment pair references a word index outside either sentence.
    /// This is a defect in the caller's data, not a recoverable condition.
    #[error("Alignment point ({source_index}, {target_index}) out of range")]
    InvalidAlignmentPoint {
        /// Source-side word index of the offending pair
        source_index: usize,
        /// Target-side word index of the offending pair
        target_index: usize,
    },

    /// Configuration problem surfaced during projection
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by a pipeline job
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage failed on one item; the job is aborted with the stage
    /// identity and the original cause attached
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        /// Name of the failing stage
        stage: &'static str,
        /// Original cause reported by the stage
        #[source]
        source: anyhow::Error,
    },

    /// The job was interrupted before completing. Reported instead of any
    /// in-flight stage error so callers can tell shutdown from failure.
    #[error("Pipeline job was interrupted")]
    Cancelled,

    /// A worker thread panicked while running a stage
    #[error("Pipeline worker panicked: {0}")]
    WorkerPanic(String),
}
