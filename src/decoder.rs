/*!
 * Decoder output boundary.
 *
 * The statistical decoder hands back a raw best-hypothesis string, an
 * optional n-best list of scored hypotheses with named feature vectors, and
 * a raw alignment matrix. This module adapts that output into the sentence
 * model: words are split on whitespace runs and rejoined with single-space
 * separators, and the `name= v v` feature string is parsed into per-feature
 * weight vectors.
 */

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::model::{Alignment, Sentence, Translation, Word};

/// One raw n-best entry as produced by the decoder
#[derive(Debug, Clone)]
pub struct RawHypothesis {
    /// Hypothesis text, whitespace-tokenized
    pub text: String,
    /// Total model score
    pub total_score: f32,
    /// Feature vector string, e.g. `"d= 0.0 -1.2 lm= -4.1"`
    pub fvals: String,
}

/// Raw decoder output for one sentence
#[derive(Debug, Clone)]
pub struct DecoderOutput {
    /// Best hypothesis text
    pub text: String,
    /// n-best list, possibly empty
    pub nbest: Vec<RawHypothesis>,
    /// Word alignment pairs between source and best hypothesis
    pub alignment: Vec<(usize, usize)>,
}

/// An n-best hypothesis adapted into the sentence model
#[derive(Debug, Clone)]
pub struct TranslationHypothesis {
    /// Hypothesis words tied back to the source (no alignment)
    pub translation: Translation,
    /// Total model score
    pub total_score: f32,
    /// Named feature weight vectors
    pub scores: HashMap<String, Vec<f32>>,
}

/// Decoder output adapted into the sentence model
#[derive(Debug, Clone)]
pub struct DecoderTranslation {
    /// The best hypothesis with its alignment
    pub translation: Translation,
    /// Adapted n-best list
    pub nbest: Vec<TranslationHypothesis>,
}

impl DecoderOutput {
    /// Adapt this raw output into the sentence model
    pub fn into_translation(self, source: Sentence) -> Result<DecoderTranslation> {
        let words = explode(&self.text);
        let translation = Translation::new(words, source.clone(), Alignment::from_pairs(self.alignment));

        let mut nbest = Vec::with_capacity(self.nbest.len());
        for hypothesis in self.nbest {
            let scores = parse_feature_scores(&hypothesis.fvals)?;
            nbest.push(TranslationHypothesis {
                translation: Translation::without_alignment(
                    explode(&hypothesis.text),
                    source.clone(),
                ),
                total_score: hypothesis.total_score,
                scores,
            });
        }

        Ok(DecoderTranslation { translation, nbest })
    }
}

/// Split text on whitespace runs and re-attach single-space separators
/// between the words
fn explode(text: &str) -> Vec<Word> {
    let pieces: Vec<&str> = text.split_whitespace().collect();
    let last = pieces.len().saturating_sub(1);
    pieces
        .iter()
        .enumerate()
        .map(|(index, piece)| Word::new(*piece, (index < last).then_some(" ")))
        .collect()
}

/// Parse a `name= v v name= v` feature string into weight vectors grouped
/// by feature name
fn parse_feature_scores(fvals: &str) -> Result<HashMap<String, Vec<f32>>> {
    let mut scores = HashMap::new();
    let mut feature: Option<String> = None;
    let mut weights: Vec<f32> = Vec::new();

    for token in fvals.split_whitespace() {
        if let Some(name) = token.strip_suffix('=') {
            if let Some(finished) = feature.take() {
                scores.insert(finished, std::mem::take(&mut weights));
            }
            feature = Some(name.to_string());
        } else {
            let value = token
                .parse::<f32>()
                .with_context(|| format!("Malformed feature weight: {}", token))?;
            weights.push(value);
        }
    }
    if let Some(finished) = feature {
        scores.insert(finished, weights);
    }

    Ok(scores)
}
