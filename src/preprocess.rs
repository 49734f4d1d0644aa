/*!
 * Markup-aware sentence preprocessor.
 *
 * Turns a raw markup-bearing string into a `Sentence`: tags are lifted out
 * with their gap position and surrounding whitespace recorded, the
 * remaining text is whitespace-tokenized, and terminal punctuation is
 * detached into words of its own.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ProjectionError;
use crate::model::{Sentence, Tag, Word};

/// Angle-bracket markup: opening, closing or self-closing tags. The name
/// must follow the bracket immediately, so comparison operators in plain
/// text ("a < b") are not mistaken for markup.
static TAG_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[a-zA-Z_][^<>]*>").unwrap());

fn is_terminal_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '…')
}

/// Tokenizer for one language
#[derive(Debug, Clone)]
pub struct Preprocessor {
    language: String,
}

impl Preprocessor {
    /// Preprocessor for the given language code
    pub fn new(language: &str) -> Self {
        Preprocessor {
            language: language.to_string(),
        }
    }

    /// Language this preprocessor was built for
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Tokenize raw text into a sentence, lifting markup tags out of the
    /// word sequence
    pub fn process(&self, text: &str) -> Result<Sentence, ProjectionError> {
        let mut words: Vec<Word> = Vec::new();
        let mut tags: Vec<Tag> = Vec::new();
        let mut cursor = 0;

        for markup in TAG_MARKUP.find_iter(text) {
            tokenize_words(&text[cursor..markup.start()], &mut words);

            let left_space = text[..markup.start()]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
            let right_run: String = text[markup.end()..]
                .chars()
                .take_while(|c| c.is_whitespace())
                .collect();
            let right_space = (!right_run.is_empty()).then_some(right_run);

            tags.push(Tag::from_text(
                markup.as_str(),
                left_space,
                right_space.as_deref(),
                words.len(),
            ));
            cursor = markup.end();
        }
        tokenize_words(&text[cursor..], &mut words);

        Sentence::new(words, tags)
    }
}

/// Split a markup-free segment into words, keeping each word's trailing
/// whitespace and detaching terminal punctuation
fn tokenize_words(segment: &str, words: &mut Vec<Word>) {
    let mut rest = segment;
    loop {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        let chunk_len = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let chunk = &trimmed[..chunk_len];
        let after = &trimmed[chunk_len..];
        let space_len = after.len() - after.trim_start().len();
        let right_space = (space_len > 0).then(|| after[..space_len].to_string());

        push_chunk(chunk, right_space, words);
        rest = after;
    }
}

/// Push one whitespace-delimited chunk, splitting off terminal punctuation
/// into separate words; only the last emitted word keeps the right space
fn push_chunk(chunk: &str, right_space: Option<String>, words: &mut Vec<Word>) {
    let mut stem = chunk;
    let mut suffixes: Vec<&str> = Vec::new();

    while let Some(last) = stem.chars().next_back() {
        if stem.chars().count() > 1 && is_terminal_punctuation(last) {
            let cut = stem.len() - last.len_utf8();
            suffixes.push(&stem[cut..]);
            stem = &stem[..cut];
        } else {
            break;
        }
    }

    let mut pieces: Vec<&str> = Vec::with_capacity(1 + suffixes.len());
    pieces.push(stem);
    pieces.extend(suffixes.into_iter().rev());

    let last_index = pieces.len() - 1;
    for (index, piece) in pieces.into_iter().enumerate() {
        let space = if index == last_index {
            right_space.as_deref()
        } else {
            None
        };
        words.push(Word::new(piece, space));
    }
}
