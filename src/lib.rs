/*!
 * # tagweave
 *
 * A Rust library for preserving text structure through machine translation.
 *
 * ## Features
 *
 * - Project markup tags (bold/italic spans, placeholders) from a source
 *   sentence onto its translation using a word-level alignment
 * - Degrade gracefully on noisy data: malformed pairs, self-closing tags
 *   and unaligned spans all resolve to a well-ordered tag sequence
 * - Reconcile whitespace so the rendered translation never gains or loses
 *   spaces around tags
 * - Merge directional alignments with named symmetrization strategies
 * - Run postprocessing stages (detokenization, word transforms, case
 *   restoration, tag projection) over batches of sentences on a parallel,
 *   order-preserving pipeline
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `model`: Tagged-sentence data model (words, tags, sentences,
 *   alignments, translations)
 * - `symmetrization`: Directional alignment merging strategies
 * - `projection`: The alignment-driven tag projection engine
 * - `pipeline`: Generic ordered, multi-worker processing pipeline
 * - `postprocess`: Concrete pipeline stages and the two named
 *   postprocessing configurations
 * - `preprocess`: Markup-aware sentence tokenization
 * - `decoder`: Adapter for raw decoder output (n-best lists, feature
 *   vectors, alignment matrices)
 * - `projection_service`: End-to-end tag projection over raw strings
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod decoder;
pub mod errors;
pub mod model;
pub mod pipeline;
pub mod postprocess;
pub mod preprocess;
pub mod projection;
pub mod projection_service;
pub mod symmetrization;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ConfigError, PipelineError, ProjectionError};
pub use model::{Alignment, Sentence, Tag, TagKind, Token, Translation, Word};
pub use pipeline::{PipelineStage, ProcessingJob, ProcessingPipeline};
pub use postprocess::Postprocessor;
pub use preprocess::Preprocessor;
pub use projection::TagProjector;
pub use projection_service::{AlignmentSpec, ProjectionService};
pub use symmetrization::SymmetrizationStrategy;
