/*!
 * Alignment-driven tag position mapping.
 *
 * Every source tag is assigned a position in the target word-gap sequence.
 * Well-formed pairs with aligned interior words enclose the aligned target
 * span; everything else (true self-closing tags, unmatched tags and pair
 * members whose span has no aligned words) is placed by scoring each
 * insertion point against the left/right word relationships the alignment
 * forces.
 */

use std::collections::{HashMap, HashSet};

use crate::model::token::Tag;
use crate::model::{Alignment, Sentence};

/// A tag mapped to the target side, remembering where it came from so that
/// ties at the same gap keep the source order
struct PlacedTag {
    tag: Tag,
    source_index: usize,
}

/// Map every source tag onto the target word-gap sequence.
///
/// Returns the projected tag array, sorted by `(target_position,
/// source_tag_index)`; the array order is the target tag sequence order.
pub(crate) fn map_tags(source: &Sentence, target_len: usize, alignment: &Alignment) -> Vec<Tag> {
    let source_tags = source.tags();
    let mut placed: Vec<PlacedTag> = Vec::with_capacity(source_tags.len());

    // Tags already mapped (well-formed closing tags are mapped together with
    // their opening tag)
    let mut resolved: HashSet<usize> = HashSet::new();

    // Placement of the opening member of a degraded pair, consulted as a
    // floor when its closing member is placed independently
    let mut opening_floor: HashMap<usize, usize> = HashMap::new();

    for (tag_index, source_tag) in source_tags.iter().enumerate() {
        if resolved.contains(&tag_index) {
            continue;
        }

        let source_position = source_tag.position;
        let closing_index = find_closing_tag(source_tags, tag_index);
        let mut single_tag = false;

        if let Some(closing_index) = closing_index {
            let close_position = source_tags[closing_index].position;

            // Aligned target span of the words strictly inside the pair
            let mut min_pos: Option<usize> = None;
            let mut max_pos: Option<usize> = None;
            for &(align_source, align_target) in alignment {
                if align_source >= source_position && align_source < close_position {
                    min_pos = Some(min_pos.map_or(align_target, |m| m.min(align_target)));
                    max_pos = Some(max_pos.map_or(align_target, |m| m.max(align_target)));
                }
            }

            if let (Some(min_pos), Some(max_pos)) = (min_pos, max_pos) {
                // Enclose the target words aligned to the source span
                placed.push(PlacedTag {
                    tag: source_tag.at_position(min_pos),
                    source_index: tag_index,
                });
                placed.push(PlacedTag {
                    tag: source_tags[closing_index].at_position(max_pos + 1),
                    source_index: closing_index,
                });
                resolved.insert(tag_index);
                resolved.insert(closing_index);
            } else {
                // No aligned words inside the pair: place both members
                // independently, self-closing style
                single_tag = true;
            }
        } else {
            single_tag = true;
        }

        if single_tag {
            let mut best_position =
                place_single_tag(source_tag, source_position, target_len, alignment);

            if let Some(&floor) = opening_floor.get(&tag_index) {
                // The opening member of this pair is already placed; never
                // close before it
                best_position = best_position.max(floor);
            } else if let Some(closing_index) = closing_index {
                opening_floor.insert(closing_index, best_position);
            }

            placed.push(PlacedTag {
                tag: source_tag.at_position(best_position),
                source_index: tag_index,
            });
            resolved.insert(tag_index);
        }
    }

    placed.sort_by_key(|p| (p.tag.position, p.source_index));
    placed.into_iter().map(|p| p.tag).collect()
}

/// Scan forward for the closing tag matching the opening tag at `tag_index`,
/// counting same-name openings so nested pairs resolve to the right partner.
fn find_closing_tag(tags: &[Tag], tag_index: usize) -> Option<usize> {
    let opening = &tags[tag_index];
    if !opening.is_opening() {
        return None;
    }

    let mut open = 1;
    for (index, tag) in tags.iter().enumerate().skip(tag_index + 1) {
        if opening.name == tag.name && tag.is_opening() {
            open += 1;
        }
        if opening.opens(tag) {
            open -= 1;
            if open == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Choose the target gap for an independently placed tag.
///
/// Words aligned left of the tag in the source should stay left of it in the
/// target, and symmetrically for the right side; a target word claimed by
/// both sides belongs to whichever side claimed it first in alignment order.
/// Each insertion point is scored by how many of these relationships it
/// preserves. Opening tags advance on equal scores (pushing them rightward),
/// all other tags only on strictly better ones. The score curve is not
/// guaranteed concave, so every insertion point is scanned.
fn place_single_tag(
    tag: &Tag,
    source_position: usize,
    target_len: usize,
    alignment: &Alignment,
) -> usize {
    let mut source_left: HashSet<usize> = HashSet::new();
    let mut source_right: HashSet<usize> = HashSet::new();

    for &(align_source, align_target) in alignment {
        if align_source < source_position {
            if !source_right.contains(&align_target) {
                source_left.insert(align_target);
            }
        } else if !source_left.contains(&align_target) {
            source_right.insert(align_target);
        }
    }

    let opening = tag.is_opening();

    let mut target_left: HashSet<usize> = HashSet::new();
    let mut target_right: HashSet<usize> = (0..target_len).collect();

    let mut best_score = source_right.intersection(&target_right).count();
    let mut best_position = 0;

    for index in 0..target_len {
        let position = index + 1;
        target_left.insert(index);
        target_right.remove(&index);

        let score = source_left.intersection(&target_left).count()
            + source_right.intersection(&target_right).count();

        if (opening && score >= best_score) || (!opening && score > best_score) {
            best_score = score;
            best_position = position;
        }
    }

    best_position
}
