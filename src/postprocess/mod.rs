/*!
 * Translation postprocessing.
 *
 * Wires the concrete stages into the two named pipeline configurations
 * (with and without detokenization) and drives batches of translations
 * through them. Both pipelines are built once per postprocessor and reused
 * across calls; the tag projector behind the projection stage is a single
 * shared instance, safe on any worker because it is purely a function of
 * its arguments.
 */

mod detokenize;
mod recase;
mod transform;

use anyhow::Result;
use once_cell::sync::Lazy;

pub use detokenize::DetokenizeStage;
pub use recase::RecaseStage;
pub use transform::TransformStage;

use crate::errors::{ConfigError, PipelineError};
use crate::model::Translation;
use crate::pipeline::{PipelineStage, ProcessingPipeline, default_workers};
use crate::projection::TagProjector;

/// The shared projector instance used by every projection stage
static TAG_PROJECTOR: Lazy<TagProjector> = Lazy::new(TagProjector::new);

/// Tag projection as a pipeline stage
#[derive(Debug, Default, Clone, Copy)]
pub struct TagProjectStage;

impl TagProjectStage {
    /// Create the stage
    pub fn new() -> Self {
        TagProjectStage
    }
}

impl PipelineStage<Translation> for TagProjectStage {
    fn name(&self) -> &'static str {
        "project-tags"
    }

    fn apply(&self, mut translation: Translation) -> Result<Translation> {
        TAG_PROJECTOR.project(&mut translation)?;
        Ok(translation)
    }
}

/// Build one postprocessing pipeline configuration
fn build_pipeline(
    language: &str,
    detokenize: bool,
    workers: usize,
) -> Result<ProcessingPipeline<Translation>, ConfigError> {
    let detokenizer = detokenize.then(|| DetokenizeStage::new(language));

    ProcessingPipeline::builder()
        .workers(workers)
        .optional_stage(detokenizer)
        .stage(TransformStage::new())
        .stage(RecaseStage::new())
        .stage(TagProjectStage::new())
        .build()
}

/// Postprocessor for one target language.
///
/// Holds the two pipeline configurations so repeated `process` calls do not
/// pay the construction cost again.
pub struct Postprocessor {
    with_detokenization: ProcessingPipeline<Translation>,
    without_detokenization: ProcessingPipeline<Translation>,
}

impl Postprocessor {
    /// Postprocessor with the default worker count
    pub fn new(language: &str) -> Result<Self, ConfigError> {
        Self::with_workers(language, default_workers())
    }

    /// Postprocessor with an explicit worker count
    pub fn with_workers(language: &str, workers: usize) -> Result<Self, ConfigError> {
        Ok(Postprocessor {
            with_detokenization: build_pipeline(language, true, workers)?,
            without_detokenization: build_pipeline(language, false, workers)?,
        })
    }

    fn pipeline(&self, detokenize: bool) -> &ProcessingPipeline<Translation> {
        if detokenize {
            &self.with_detokenization
        } else {
            &self.without_detokenization
        }
    }

    /// Run one translation through all stages on the calling thread
    pub fn process(
        &self,
        translation: Translation,
        detokenize: bool,
    ) -> Result<Translation, PipelineError> {
        self.pipeline(detokenize).process(translation)
    }

    /// Run a batch of translations through the pipeline with parallel
    /// stage execution; results keep the input order
    pub async fn process_batch(
        &self,
        translations: Vec<Translation>,
        detokenize: bool,
    ) -> Result<Vec<Translation>, PipelineError> {
        self.pipeline(detokenize).process_batch(translations).await
    }
}
