/*!
 * Word and tag tokens.
 *
 * A sentence is rendered as an ordered stream of tokens. A token is either a
 * word (textual content occupying one index in the word sequence) or a markup
 * tag addressing a gap between words. Every token carries its right-side
 * whitespace verbatim: `None` means no space, `Some(s)` means the exact
 * spacing text that followed it.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Markup tag pattern: captures the closing slash, the tag name and the
/// self-closing slash of an angle-bracket tag
static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<\s*(/?)\s*([a-zA-Z_][a-zA-Z0-9._:-]*)[^>]*?(/?)\s*>$").unwrap()
});

/// A word token with textual content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Surface text of the word
    pub text: String,

    /// Exact whitespace following the word, if any
    pub right_space: Option<String>,
}

impl Word {
    /// Create a word with its trailing whitespace
    pub fn new(text: impl Into<String>, right_space: Option<&str>) -> Self {
        Word {
            text: text.into(),
            right_space: right_space.map(|s| s.to_string()),
        }
    }

    /// Whether the word is followed by whitespace
    pub fn has_right_space(&self) -> bool {
        self.right_space.is_some()
    }
}

/// Structural kind of a markup tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Opens a span, e.g. `<b>`
    Opening,
    /// Closes a span, e.g. `</b>`
    Closing,
    /// Stands alone, e.g. `<br/>`
    SelfClosing,
}

/// A markup tag token.
///
/// A tag does not occupy a word index; its `position` addresses the gap
/// before the word with the same index, so valid positions range over
/// `0..=word_count`. Two same-name tags where one opens and the other closes,
/// correctly nested, form a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Raw markup text, e.g. `"</i>"`
    pub text: String,

    /// Tag name, e.g. `"i"`
    pub name: String,

    /// Opening, closing or self-closing
    pub kind: TagKind,

    /// Whether whitespace preceded the tag in the original text
    pub left_space: bool,

    /// Exact whitespace following the tag, if any
    pub right_space: Option<String>,

    /// Gap index before the word with the same index, in `0..=word_count`
    pub position: usize,
}

impl Tag {
    /// Parse a tag from its raw markup text.
    ///
    /// The name and kind are derived from the markup itself; text that does
    /// not look like an angle-bracket tag is kept verbatim as a self-closing
    /// tag named after its trimmed content.
    pub fn from_text(
        text: impl Into<String>,
        left_space: bool,
        right_space: Option<&str>,
        position: usize,
    ) -> Self {
        let text = text.into();
        let (name, kind) = match TAG_PATTERN.captures(&text) {
            Some(caps) => {
                let closing = !caps[1].is_empty();
                let self_closing = !caps[3].is_empty();
                let kind = if closing {
                    TagKind::Closing
                } else if self_closing {
                    TagKind::SelfClosing
                } else {
                    TagKind::Opening
                };
                (caps[2].to_string(), kind)
            }
            None => (text.trim().to_string(), TagKind::SelfClosing),
        };

        Tag {
            text,
            name,
            kind,
            left_space,
            right_space: right_space.map(|s| s.to_string()),
            position,
        }
    }

    /// Copy of this tag placed at a different gap position
    pub fn at_position(&self, position: usize) -> Self {
        Tag {
            position,
            ..self.clone()
        }
    }

    /// Whether this is an opening tag
    pub fn is_opening(&self) -> bool {
        self.kind == TagKind::Opening
    }

    /// Whether this is a closing tag
    pub fn is_closing(&self) -> bool {
        self.kind == TagKind::Closing
    }

    /// Whether this opening tag is closed by `other`
    pub fn opens(&self, other: &Tag) -> bool {
        self.kind == TagKind::Opening && other.kind == TagKind::Closing && self.name == other.name
    }

    /// Whether whitespace followed the tag
    pub fn has_right_space(&self) -> bool {
        self.right_space.is_some()
    }
}

/// Borrowed view over the two token variants, used when walking a sentence's
/// merged rendering order
#[derive(Debug, Clone, Copy)]
pub enum Token<'a> {
    /// A word token
    Word(&'a Word),
    /// A tag token
    Tag(&'a Tag),
}

impl<'a> Token<'a> {
    /// Surface text of the token
    pub fn text(&self) -> &'a str {
        match *self {
            Token::Word(word) => &word.text,
            Token::Tag(tag) => &tag.text,
        }
    }

    /// Trailing whitespace of the token, if any
    pub fn right_space(&self) -> Option<&'a str> {
        match *self {
            Token::Word(word) => word.right_space.as_deref(),
            Token::Tag(tag) => tag.right_space.as_deref(),
        }
    }
}
