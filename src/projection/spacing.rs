/*!
 * Whitespace reconciliation over a projected sentence.
 *
 * Position mapping leaves word and tag spacing as it was on the source side;
 * these passes make the merged token stream render cleanly: a tag that lands
 * at the sentence end can borrow a space from the final word, a tag without
 * a declared left space absorbs the previous token's right space, the first
 * token never keeps a left space and the last token never keeps a right
 * space.
 */

use crate::model::Sentence;
use crate::model::sentence::TokenSlot;

/// Run both reconciliation passes over the sentence's merged token order.
pub(crate) fn reconcile_spaces(sentence: &mut Sentence) {
    borrow_space_before_trailing_tags(sentence);
    absorb_and_trim(sentence);
}

/// If tags trail the last word and the first of them expects a leading
/// space, give the last word a right space when it has none.
fn borrow_space_before_trailing_tags(sentence: &mut Sentence) {
    let word_count = sentence.words().len();
    let tag_count = sentence.tags().len();
    if word_count == 0 || tag_count == 0 {
        return;
    }

    let mut first_trailing = tag_count;
    while first_trailing > 0 && sentence.tags()[first_trailing - 1].position == word_count {
        first_trailing -= 1;
    }
    if first_trailing == tag_count {
        return;
    }

    let wants_space = sentence.tags()[first_trailing].left_space
        && !sentence.words()[word_count - 1].has_right_space();
    if wants_space {
        sentence.words_mut()[word_count - 1].right_space = Some(" ".to_string());
    }
}

/// Walk tokens in order: a tag without a left space absorbs the previous
/// token's right space (unless it already has one of its own); the first
/// token, if a tag, loses its left space; the last token loses its right
/// space.
fn absorb_and_trim(sentence: &mut Sentence) {
    let slots = sentence.token_slots();

    let mut previous: Option<TokenSlot> = None;
    for &slot in &slots {
        if let TokenSlot::Tag(tag_index) = slot {
            match previous {
                Some(prev) => {
                    let prev_space = right_space_of(sentence, prev);
                    if prev_space.is_some() && !sentence.tags()[tag_index].left_space {
                        if !sentence.tags()[tag_index].has_right_space() {
                            sentence.tags_mut()[tag_index].right_space = prev_space;
                        }
                        set_right_space(sentence, prev, None);
                    }
                }
                None => sentence.tags_mut()[tag_index].left_space = false,
            }
        }
        previous = Some(slot);
    }

    if let Some(last) = previous {
        set_right_space(sentence, last, None);
    }
}

fn right_space_of(sentence: &Sentence, slot: TokenSlot) -> Option<String> {
    match slot {
        TokenSlot::Word(i) => sentence.words()[i].right_space.clone(),
        TokenSlot::Tag(i) => sentence.tags()[i].right_space.clone(),
    }
}

fn set_right_space(sentence: &mut Sentence, slot: TokenSlot, space: Option<String>) {
    match slot {
        TokenSlot::Word(i) => sentence.words_mut()[i].right_space = space,
        TokenSlot::Tag(i) => sentence.tags_mut()[i].right_space = space,
    }
}
