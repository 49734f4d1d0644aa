/*!
 * Translation model: a target sentence tied to its source and alignment.
 */

use std::fmt;

use crate::model::alignment::Alignment;
use crate::model::sentence::Sentence;
use crate::model::token::{Tag, Word};

/// A translated sentence.
///
/// Owns the target words, the source sentence they were translated from and
/// the word alignment between the two. The target tag sequence starts empty
/// and is filled in by tag projection.
#[derive(Debug, Clone)]
pub struct Translation {
    source: Sentence,
    target: Sentence,
    alignment: Option<Alignment>,
}

impl Translation {
    /// Translation over target words, with an alignment back to the source
    pub fn new(target_words: Vec<Word>, source: Sentence, alignment: Alignment) -> Self {
        Translation {
            source,
            target: Sentence::from_words(target_words),
            alignment: Some(alignment),
        }
    }

    /// Translation without an alignment (e.g. an n-best hypothesis that only
    /// carries words)
    pub fn without_alignment(target_words: Vec<Word>, source: Sentence) -> Self {
        Translation {
            source,
            target: Sentence::from_words(target_words),
            alignment: None,
        }
    }

    /// Translation over already tokenized sentences
    pub fn from_sentences(source: Sentence, target: Sentence, alignment: Alignment) -> Self {
        Translation {
            source,
            target,
            alignment: Some(alignment),
        }
    }

    /// The source sentence
    pub fn source(&self) -> &Sentence {
        &self.source
    }

    /// The target sentence (words plus any projected tags)
    pub fn target(&self) -> &Sentence {
        &self.target
    }

    /// Mutable target sentence, for projection and whitespace fixes
    pub fn target_mut(&mut self) -> &mut Sentence {
        &mut self.target
    }

    /// Target words in sequence order
    pub fn words(&self) -> &[Word] {
        self.target.words()
    }

    /// Projected target tags, empty before projection
    pub fn tags(&self) -> &[Tag] {
        self.target.tags()
    }

    /// Replace the projected tag sequence wholesale
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.target.set_tags(tags);
    }

    /// The word alignment, if present
    pub fn alignment(&self) -> Option<&Alignment> {
        self.alignment.as_ref()
    }

    /// Whether a word alignment is present
    pub fn has_alignment(&self) -> bool {
        self.alignment.is_some()
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.target.fmt(f)
    }
}
