/*!
 * Tests for the tag projection engine, covering the documented properties:
 * identity round-trip, pair monotonicity, fallback on unaligned spans,
 * degenerate sentences and whitespace invariants.
 */

use tagweave::model::{Alignment, Tag};
use tagweave::{ProjectionError, TagProjector, Translation};

use crate::common::{assert_whitespace_invariants, sentence, spaced_words, translation};

fn positions(translation: &Translation) -> Vec<usize> {
    translation.tags().iter().map(|t| t.position).collect()
}

#[test]
fn test_identityAlignment_shouldReproduceSourcePositions() {
    // Property: with an identity alignment and equal word counts, the
    // projected positions equal the source positions
    let cases: Vec<(usize, usize)> = vec![(0, 1), (1, 3), (2, 4), (0, 4)];
    for (open, close) in cases {
        let mut t = translation(
            &["w0", "w1", "w2", "w3"],
            vec![
                Tag::from_text("<i>", false, None, open),
                Tag::from_text("</i>", false, None, close),
            ],
            &["t0", "t1", "t2", "t3"],
            (0..4).map(|i| (i, i)).collect(),
        );
        TagProjector::new().project(&mut t).unwrap();
        assert_eq!(positions(&t), vec![open, close], "pair ({}, {})", open, close);
    }
}

#[test]
fn test_pairMonotonicity_shouldHoldAcrossAlignments() {
    let alignments: Vec<Vec<(usize, usize)>> = vec![
        vec![(0, 2), (1, 1), (2, 0)],
        vec![(0, 0), (1, 2), (2, 1)],
        vec![(0, 1), (1, 0), (2, 2)],
        vec![(1, 2), (2, 0)],
    ];

    for pairs in alignments {
        let mut t = translation(
            &["a", "b", "c"],
            vec![
                Tag::from_text("<b>", false, None, 1),
                Tag::from_text("</b>", false, None, 3),
            ],
            &["x", "y", "z"],
            pairs.clone(),
        );
        TagProjector::new().project(&mut t).unwrap();

        let open = t.tags().iter().find(|t| t.is_opening()).unwrap();
        let close = t.tags().iter().find(|t| t.is_closing()).unwrap();
        assert!(
            open.position <= close.position,
            "alignment {:?} broke monotonicity",
            pairs
        );
    }
}

#[test]
fn test_unalignedSpan_shouldFallBackWithoutCrossing() {
    // Property: a pair whose interior has no aligned target words degrades
    // to two independent placements, never crossing after clamping
    let mut t = translation(
        &["a", "b", "c"],
        vec![
            Tag::from_text("<b>", false, None, 1),
            Tag::from_text("</b>", false, None, 2),
        ],
        &["x", "y", "z"],
        vec![(0, 0), (2, 2)],
    );
    TagProjector::new().project(&mut t).unwrap();

    assert_eq!(t.tags().len(), 2);
    let open = t.tags().iter().find(|t| t.is_opening()).unwrap();
    let close = t.tags().iter().find(|t| t.is_closing()).unwrap();
    assert!(open.position <= close.position);
}

#[test]
fn test_degenerateTarget_shouldCopySourceTagsUnmodified() {
    let source = sentence(
        &["hello", "world"],
        vec![
            Tag::from_text("<b>", true, Some(" "), 1),
            Tag::from_text("</b>", false, None, 2),
        ],
    );
    let mut t = Translation::new(Vec::new(), source, Alignment::default());
    TagProjector::new().project(&mut t).unwrap();

    assert_eq!(t.tags(), t.source().tags());
}

#[test]
fn test_taggedSourceWithWordedTarget_missingAlignment_shouldFail() {
    let source = sentence(&["hi"], vec![Tag::from_text("<b/>", false, None, 0)]);
    let mut t = Translation::without_alignment(spaced_words(&["ciao"]), source);

    assert!(matches!(
        TagProjector::new().project(&mut t),
        Err(ProjectionError::MissingAlignment)
    ));
}

#[test]
fn test_untaggedSource_missingAlignment_shouldStillSucceed() {
    let source = sentence(&["hi"], Vec::new());
    let mut t = Translation::without_alignment(spaced_words(&["ciao"]), source);
    assert!(TagProjector::new().project(&mut t).is_ok());
}

#[test]
fn test_whitespaceInvariants_shouldHoldAfterProjection() {
    let alignments: Vec<Vec<(usize, usize)>> = vec![
        (0..5).map(|i| (i, i)).collect(),
        vec![(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)],
        vec![(0, 0), (2, 1)],
        Vec::new(),
    ];

    for pairs in alignments {
        let mut t = translation(
            &["one", "two", "three", "four", "five"],
            vec![
                Tag::from_text("<i>", true, None, 1),
                Tag::from_text("</i>", false, Some(" "), 3),
                Tag::from_text("<br/>", true, None, 5),
            ],
            &["uno", "due", "tre", "quattro", "cinque"],
            pairs.clone(),
        );
        TagProjector::new().project(&mut t).unwrap();
        assert_whitespace_invariants(t.target());
    }
}

#[test]
fn test_projectedExample_shouldEncloseAlignedWord() {
    // "It often corresponds <i>to</i> ." onto "Spesso corresponde a
    // *99***1# ."; the pair interior aligns to the first target word, so
    // the tags enclose it
    let mut t = translation(
        &["It", "often", "corresponds", "to", "."],
        vec![
            Tag::from_text("<i>", true, None, 2),
            Tag::from_text("</i>", false, Some(" "), 3),
        ],
        &["Spesso", "corresponde", "a", "*99***1#", "."],
        vec![(1, 1), (1, 2), (2, 0), (3, 3), (4, 4)],
    );
    TagProjector::new().project(&mut t).unwrap();

    assert_eq!(positions(&t), vec![0, 1]);
    assert_eq!(t.to_string(), "<i>Spesso</i> corresponde a *99***1# .");
}

#[test]
fn test_project_outputOrder_isSortedByPositionThenSourceIndex() {
    let mut t = translation(
        &["a", "b", "c", "d"],
        vec![
            Tag::from_text("<w/>", false, None, 1),
            Tag::from_text("<u/>", false, None, 3),
            Tag::from_text("<v/>", false, None, 3),
        ],
        &["w", "x", "y", "z"],
        (0..4).map(|i| (i, i)).collect(),
    );
    TagProjector::new().project(&mut t).unwrap();

    let sorted_positions = positions(&t);
    let mut expected = sorted_positions.clone();
    expected.sort_unstable();
    assert_eq!(sorted_positions, expected);
    // Tags sharing a gap keep their source order
    let names: Vec<&str> = t.tags().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["w", "u", "v"]);
}
