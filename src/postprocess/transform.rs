/*!
 * Word transformation stage.
 *
 * Decoder output carries XML-escaped word text whenever the input sentence
 * was markup-bearing; this stage restores the literal characters, including
 * numeric character references.
 */

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::Translation;
use crate::pipeline::PipelineStage;

/// Numeric character references, decimal (`&#65;`) and hex (`&#x41;`)
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x?)([0-9a-fA-F]+);").unwrap());

fn unescape(text: &str) -> String {
    let text = NUMERIC_ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let radix = if caps[1].is_empty() { 10 } else { 16 };
        u32::from_str_radix(&caps[2], radix)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // `&amp;` last, so already-unescaped ampersands are not re-expanded
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// XML entity unescaping over every target word
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformStage;

impl TransformStage {
    /// Create the stage
    pub fn new() -> Self {
        TransformStage
    }
}

impl PipelineStage<Translation> for TransformStage {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn apply(&self, mut translation: Translation) -> Result<Translation> {
        for word in translation.target_mut().words_mut() {
            if word.text.contains('&') {
                word.text = unescape(&word.text);
            }
        }
        Ok(translation)
    }
}
