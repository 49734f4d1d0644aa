/*!
 * Sentence model: an ordered word sequence plus an ordered tag sequence.
 */

use std::fmt;

use crate::errors::ProjectionError;
use crate::model::token::{Tag, Token, Word};

/// Position of one token inside a sentence's merged rendering order, as an
/// index into either the word or the tag array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenSlot {
    /// Index into the word array
    Word(usize),
    /// Index into the tag array
    Tag(usize),
}

/// A sentence: words in sequence order, tags addressable by the gap they
/// occupy among the words.
///
/// Words and tags are kept in separate arrays; the merged rendering order
/// interleaves them by gap position, with every tag at gap `i` preceding word
/// `i` and tags sharing a gap keeping their array order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    words: Vec<Word>,
    tags: Vec<Tag>,
}

impl Sentence {
    /// Create a sentence from its word and tag sequences.
    ///
    /// Tags must already be ordered by position (ties keeping their original
    /// order); fails if any tag addresses a gap outside `0..=words.len()`.
    pub fn new(words: Vec<Word>, tags: Vec<Tag>) -> Result<Self, ProjectionError> {
        for tag in &tags {
            if tag.position > words.len() {
                return Err(ProjectionError::InvalidTagPosition {
                    position: tag.position,
                    word_count: words.len(),
                });
            }
        }
        Ok(Sentence { words, tags })
    }

    /// Sentence with words only
    pub fn from_words(words: Vec<Word>) -> Self {
        Sentence {
            words,
            tags: Vec::new(),
        }
    }

    /// Words in sequence order
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Mutable access to the words (whitespace reconciliation only)
    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Tags ordered by gap position
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Mutable access to the tags (whitespace reconciliation only)
    pub(crate) fn tags_mut(&mut self) -> &mut [Tag] {
        &mut self.tags
    }

    /// Whether the sentence carries any words
    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }

    /// Whether the sentence carries any tags
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }

    /// Replace the tag sequence wholesale.
    ///
    /// This is the only mutation the projection step performs on the tag
    /// array; there are no incremental in-place edits.
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }

    /// Merged rendering order over both arrays
    pub(crate) fn token_slots(&self) -> Vec<TokenSlot> {
        let mut slots = Vec::with_capacity(self.words.len() + self.tags.len());
        let mut tag_index = 0;

        for word_index in 0..=self.words.len() {
            while tag_index < self.tags.len() && self.tags[tag_index].position <= word_index {
                slots.push(TokenSlot::Tag(tag_index));
                tag_index += 1;
            }
            if word_index < self.words.len() {
                slots.push(TokenSlot::Word(word_index));
            }
        }

        slots
    }

    /// Iterate tokens in merged rendering order
    pub fn tokens(&self) -> impl Iterator<Item = Token<'_>> + '_ {
        self.token_slots().into_iter().map(move |slot| match slot {
            TokenSlot::Word(i) => Token::Word(&self.words[i]),
            TokenSlot::Tag(i) => Token::Tag(&self.tags[i]),
        })
    }

    /// Textual rendering ignoring tags
    pub fn stripped_string(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            out.push_str(&word.text);
            if let Some(space) = &word.right_space {
                out.push_str(space);
            }
        }
        out.trim_end().to_string()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in self.tokens() {
            f.write_str(token.text())?;
            if let Some(space) = token.right_space() {
                f.write_str(space)?;
            }
        }
        Ok(())
    }
}
