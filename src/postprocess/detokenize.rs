/*!
 * Rule-based detokenizer stage.
 *
 * Recomputes the right-side whitespace of the target words: a single space
 * between words, no space before closing punctuation, none after opening
 * brackets, and none after apostrophe-final clitics in languages that elide
 * (French, Italian, Catalan).
 */

use anyhow::Result;

use crate::model::Translation;
use crate::pipeline::PipelineStage;

/// Languages whose elided articles bind to the following word
const ELIDING_LANGUAGES: [&str; 3] = ["fr", "it", "ca"];

fn is_closing_punctuation(text: &str) -> bool {
    matches!(
        text,
        "." | "," | ";" | ":" | "!" | "?" | "%" | ")" | "]" | "}" | "»" | "…" | "'" | "\""
    )
}

fn is_opening_punctuation(text: &str) -> bool {
    matches!(text, "(" | "[" | "{" | "«" | "¿" | "¡")
}

/// Detokenization stage for one target language
pub struct DetokenizeStage {
    elides: bool,
}

impl DetokenizeStage {
    /// Stage configured for the given language code
    pub fn new(language: &str) -> Self {
        let language = language.to_ascii_lowercase();
        let base = language.split(['-', '_']).next().unwrap_or(&language);
        DetokenizeStage {
            elides: ELIDING_LANGUAGES.contains(&base),
        }
    }
}

impl PipelineStage<Translation> for DetokenizeStage {
    fn name(&self) -> &'static str {
        "detokenize"
    }

    fn apply(&self, mut translation: Translation) -> Result<Translation> {
        let words = translation.target_mut().words_mut();
        let count = words.len();

        for index in 0..count {
            let no_space_after = is_opening_punctuation(&words[index].text)
                || (self.elides && words[index].text.len() > 1 && words[index].text.ends_with('\''));
            let next_closes =
                index + 1 < count && is_closing_punctuation(&words[index + 1].text);

            words[index].right_space = if index + 1 == count || no_space_after || next_closes {
                None
            } else {
                Some(" ".to_string())
            };
        }

        Ok(translation)
    }
}
