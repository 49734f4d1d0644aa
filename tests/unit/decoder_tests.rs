/*!
 * Tests for the decoder output boundary.
 */

use tagweave::decoder::{DecoderOutput, RawHypothesis};

use crate::common::sentence;

fn output(text: &str, nbest: Vec<RawHypothesis>, alignment: Vec<(usize, usize)>) -> DecoderOutput {
    DecoderOutput {
        text: text.to_string(),
        nbest,
        alignment,
    }
}

#[test]
fn test_intoTranslation_bestHypothesis_shouldSplitOnWhitespaceRuns() {
    let decoded = output("ciao   mondo !", Vec::new(), vec![(0, 0), (1, 1), (2, 2)])
        .into_translation(sentence(&["hello", "world", "!"], Vec::new()))
        .unwrap();

    assert_eq!(decoded.translation.words().len(), 3);
    // Multi-space runs collapse to single-space separators
    assert_eq!(decoded.translation.to_string(), "ciao mondo !");
}

#[test]
fn test_intoTranslation_lastWord_shouldHaveNoTrailingSpace() {
    let decoded = output("uno due", Vec::new(), vec![(0, 0), (1, 1)])
        .into_translation(sentence(&["one", "two"], Vec::new()))
        .unwrap();

    let words = decoded.translation.words();
    assert_eq!(words[0].right_space.as_deref(), Some(" "));
    assert!(words[1].right_space.is_none());
}

#[test]
fn test_intoTranslation_nbest_shouldParseFeatureVectors() {
    let decoded = output(
        "ciao mondo",
        vec![RawHypothesis {
            text: "ciao mondo".to_string(),
            total_score: -3.25,
            fvals: "d= 0.0 -0.5 lm= -12.75 w= -2.0".to_string(),
        }],
        vec![(0, 0), (1, 1)],
    )
    .into_translation(sentence(&["hello", "world"], Vec::new()))
    .unwrap();

    let hypothesis = &decoded.nbest[0];
    assert_eq!(hypothesis.total_score, -3.25);
    assert_eq!(hypothesis.scores.len(), 3);
    assert_eq!(hypothesis.scores.get("d").unwrap(), &vec![0.0, -0.5]);
    assert_eq!(hypothesis.scores.get("lm").unwrap(), &vec![-12.75]);
    assert_eq!(hypothesis.scores.get("w").unwrap(), &vec![-2.0]);
}

#[test]
fn test_intoTranslation_hypothesis_shouldNotCarryAlignment() {
    let decoded = output(
        "ciao",
        vec![RawHypothesis {
            text: "salve".to_string(),
            total_score: -1.0,
            fvals: String::new(),
        }],
        vec![(0, 0)],
    )
    .into_translation(sentence(&["hello"], Vec::new()))
    .unwrap();

    assert!(decoded.translation.has_alignment());
    assert!(!decoded.nbest[0].translation.has_alignment());
}

#[test]
fn test_intoTranslation_malformedFeatureVector_shouldFail() {
    let result = output(
        "ciao",
        vec![RawHypothesis {
            text: "ciao".to_string(),
            total_score: 0.0,
            fvals: "lm= not-a-number".to_string(),
        }],
        vec![(0, 0)],
    )
    .into_translation(sentence(&["hello"], Vec::new()));

    assert!(result.is_err());
}
