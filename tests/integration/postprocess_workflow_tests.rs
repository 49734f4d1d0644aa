/*!
 * End-to-end postprocessing workflow tests: preprocessed source sentences
 * and decoder output driven through the batch pipeline.
 */

use tagweave::decoder::DecoderOutput;
use tagweave::{Postprocessor, Preprocessor};

use crate::common::assert_whitespace_invariants;

#[tokio::test(flavor = "multi_thread")]
async fn test_workflow_decoderOutputThroughPipeline_shouldProjectAndRecase() {
    let preprocessor = Preprocessor::new("en");
    let source = preprocessor.process("Hello <b>world</b>!").unwrap();

    let decoded = DecoderOutput {
        text: "ciao mondo !".to_string(),
        nbest: Vec::new(),
        alignment: vec![(0, 0), (1, 1), (2, 2)],
    }
    .into_translation(source)
    .unwrap();

    let postprocessor = Postprocessor::with_workers("it", 2).unwrap();
    let result = postprocessor.process(decoded.translation, true).unwrap();

    // Recased, detokenized and projected
    assert_eq!(result.to_string(), "Ciao <b>mondo</b>!");
    assert_whitespace_invariants(result.target());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_workflow_batch_shouldPreserveOrderAcrossWorkers() {
    let preprocessor = Preprocessor::new("en");
    let postprocessor = Postprocessor::with_workers("it", 4).unwrap();

    let batch: Vec<_> = (0..24)
        .map(|i| {
            let source = preprocessor
                .process(&format!("sentence <i>number</i> {}", i))
                .unwrap();
            DecoderOutput {
                text: format!("frase {} numero", i),
                nbest: Vec::new(),
                alignment: vec![(0, 0), (1, 2), (2, 1)],
            }
            .into_translation(source)
            .unwrap()
            .translation
        })
        .collect();

    let results = postprocessor.process_batch(batch, true).await.unwrap();

    assert_eq!(results.len(), 24);
    for (i, result) in results.iter().enumerate() {
        assert!(
            result.to_string().contains(&format!("frase {}", i)),
            "item {} out of order: {}",
            i,
            result
        );
        assert_eq!(result.tags().len(), 2, "item {} lost its tags", i);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_workflow_detokenizationToggle_shouldOnlyChangeSpacing() {
    let preprocessor = Preprocessor::new("en");
    let source = preprocessor.process("Good morning !").unwrap();

    let make_translation = || {
        DecoderOutput {
            text: "buon giorno !".to_string(),
            nbest: Vec::new(),
            alignment: vec![(0, 0), (1, 1), (2, 2)],
        }
        .into_translation(source.clone())
        .unwrap()
        .translation
    };

    let postprocessor = Postprocessor::with_workers("it", 2).unwrap();

    let detokenized = postprocessor
        .process_batch(vec![make_translation()], true)
        .await
        .unwrap();
    let verbatim = postprocessor
        .process_batch(vec![make_translation()], false)
        .await
        .unwrap();

    assert_eq!(detokenized[0].to_string(), "Buon giorno!");
    assert_eq!(verbatim[0].to_string(), "Buon giorno !");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_workflow_untaggedBatch_shouldPassThrough() {
    let preprocessor = Preprocessor::new("en");
    let source = preprocessor.process("no markup here").unwrap();

    let translation = DecoderOutput {
        text: "nessun markup qui".to_string(),
        nbest: Vec::new(),
        alignment: vec![(0, 0), (1, 1), (2, 2)],
    }
    .into_translation(source)
    .unwrap()
    .translation;

    let postprocessor = Postprocessor::with_workers("it", 2).unwrap();
    let results = postprocessor.process_batch(vec![translation], false).await.unwrap();

    assert!(results[0].tags().is_empty());
    assert_eq!(results[0].to_string(), "nessun markup qui");
}
