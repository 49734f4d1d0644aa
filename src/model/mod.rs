/*!
 * Tagged-sentence data model.
 *
 * The model is built from four pieces: words and tags (the two token
 * variants), sentences (ordered words plus gap-addressed tags), alignments
 * (many-to-many word correspondences) and translations (a target sentence
 * tied back to its source and alignment).
 */

pub mod alignment;
pub mod sentence;
pub mod token;
pub mod translation;

pub use alignment::Alignment;
pub use sentence::Sentence;
pub use token::{Tag, TagKind, Token, Word};
pub use translation::Translation;
