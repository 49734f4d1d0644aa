/*!
 * Case restoration stage.
 *
 * Decoders work on lowercased text; this stage restores sentence casing on
 * the target using the source as the reference: when the source sentence
 * opens with an uppercase letter, so does the target.
 */

use anyhow::Result;

use crate::model::Translation;
use crate::pipeline::PipelineStage;

/// Sentence-initial case restoration
#[derive(Debug, Default, Clone, Copy)]
pub struct RecaseStage;

impl RecaseStage {
    /// Create the stage
    pub fn new() -> Self {
        RecaseStage
    }
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl PipelineStage<Translation> for RecaseStage {
    fn name(&self) -> &'static str {
        "recase"
    }

    fn apply(&self, mut translation: Translation) -> Result<Translation> {
        let source_upper = translation
            .source()
            .words()
            .first()
            .is_some_and(|w| starts_uppercase(&w.text));

        if source_upper {
            if let Some(first) = translation.target_mut().words_mut().first_mut() {
                first.text = capitalize(&first.text);
            }
        }

        Ok(translation)
    }
}
