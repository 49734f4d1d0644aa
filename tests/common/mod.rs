/*!
 * Common test utilities shared across the test suite.
 */

use tagweave::model::{Alignment, Sentence, Tag, Word};
use tagweave::{Token, Translation};

/// Words from plain texts, single-spaced except the last
pub fn spaced_words(texts: &[&str]) -> Vec<Word> {
    let last = texts.len().saturating_sub(1);
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Word::new(*t, if i < last { Some(" ") } else { None }))
        .collect()
}

/// Sentence from word texts and tags
pub fn sentence(texts: &[&str], tags: Vec<Tag>) -> Sentence {
    Sentence::new(spaced_words(texts), tags).expect("valid test sentence")
}

/// Translation from source/target word texts, source tags and alignment
/// pairs
pub fn translation(
    source_texts: &[&str],
    source_tags: Vec<Tag>,
    target_texts: &[&str],
    alignment: Vec<(usize, usize)>,
) -> Translation {
    Translation::new(
        spaced_words(target_texts),
        sentence(source_texts, source_tags),
        Alignment::from_pairs(alignment),
    )
}

/// Assert the whitespace invariants over a sentence's token stream: no tag
/// lacking a left space directly follows a token with a right space, and
/// the final token has no right space.
pub fn assert_whitespace_invariants(sentence: &Sentence) {
    let tokens: Vec<Token<'_>> = sentence.tokens().collect();
    for pair in tokens.windows(2) {
        if let Token::Tag(tag) = pair[1] {
            if !tag.left_space {
                assert!(
                    pair[0].right_space().is_none(),
                    "token '{}' keeps a right space before tag '{}'",
                    pair[0].text(),
                    tag.text
                );
            }
        }
    }
    if let Some(last) = tokens.last() {
        assert!(
            last.right_space().is_none(),
            "final token '{}' keeps a right space",
            last.text()
        );
    }
}
