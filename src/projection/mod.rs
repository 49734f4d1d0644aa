/*!
 * Tag projection engine.
 *
 * Given a translation whose source sentence carries markup tags and whose
 * alignment maps source words to target words, projection produces the
 * target tag sequence: each tag is repositioned so the tagged spans still
 * enclose the corresponding translated words, then whitespace is reconciled
 * over the merged token stream.
 */

mod engine;
mod spacing;

use log::debug;

use crate::errors::ProjectionError;
use crate::model::Translation;

/// Projects source tags onto a translation.
///
/// Stateless: a single shared instance can serve any number of concurrent
/// callers, since the output is purely a function of the translation passed
/// in.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagProjector;

impl TagProjector {
    /// Create a projector
    pub fn new() -> Self {
        TagProjector
    }

    /// Project the source tags of `translation` onto its target sentence.
    ///
    /// - Without source tags this is a no-op.
    /// - With source tags but no target words, the tags are copied verbatim
    ///   (degenerate single-gap sentence).
    /// - With target words, an alignment is required; the tag positions are
    ///   mapped and the whitespace of the merged token stream reconciled.
    ///
    /// Target words are never reordered or rewritten; only their whitespace
    /// can change.
    pub fn project(&self, translation: &mut Translation) -> Result<(), ProjectionError> {
        if !translation.source().has_tags() {
            return Ok(());
        }

        if !translation.target().has_words() {
            let tags = translation.source().tags().to_vec();
            translation.set_tags(tags);
            return Ok(());
        }

        let Some(alignment) = translation.alignment() else {
            return Err(ProjectionError::MissingAlignment);
        };

        let target_len = translation.words().len();
        let tags = engine::map_tags(translation.source(), target_len, alignment);
        debug!(
            "Projected {} source tags onto {} target gaps",
            translation.source().tags().len(),
            target_len + 1
        );

        translation.set_tags(tags);
        spacing::reconcile_spaces(translation.target_mut());
        Ok(())
    }
}
