/*!
 * End-to-end tag projection over raw strings.
 *
 * The service owns the preprocessors for one language pair and drives the
 * whole projection path: tokenize both texts, resolve the alignment
 * (optionally merging two directional alignments with an explicit
 * symmetrization strategy), project the tags and hand back the finished
 * translation. The language pair may also be given in the inverted
 * direction, in which case the provided alignment is inverted to match.
 */

use std::time::Instant;

use log::debug;
use once_cell::sync::{Lazy, OnceCell};

use crate::errors::{ConfigError, ProjectionError};
use crate::model::{Alignment, Translation};
use crate::preprocess::Preprocessor;
use crate::projection::TagProjector;
use crate::symmetrization::SymmetrizationStrategy;

/// The shared projector instance; purely a function of its arguments, so
/// one instance serves all concurrent requests
static TAG_PROJECTOR: Lazy<TagProjector> = Lazy::new(TagProjector::new);

/// How the word alignment for a projection request is supplied
#[derive(Debug, Clone)]
pub enum AlignmentSpec {
    /// A single, already merged alignment
    Merged(Alignment),
    /// Two directional alignments plus the strategy merging them; the
    /// strategy travels with the request instead of living as shared
    /// mutable configuration
    Directional {
        /// Source-to-target alignment
        forward: Alignment,
        /// Target-to-source alignment, in source-to-target coordinates
        backward: Alignment,
        /// Merge strategy
        strategy: SymmetrizationStrategy,
    },
}

impl AlignmentSpec {
    fn resolve(self) -> Alignment {
        match self {
            AlignmentSpec::Merged(alignment) => alignment,
            AlignmentSpec::Directional {
                forward,
                backward,
                strategy,
            } => strategy.merge(&forward, &backward),
        }
    }
}

/// Tag projection facade for one language pair
pub struct ProjectionService {
    source_language: String,
    target_language: String,
    source_preprocessor: Preprocessor,
    target_preprocessor: OnceCell<Preprocessor>,
}

impl ProjectionService {
    /// Service for the given language pair
    pub fn new(source_language: &str, target_language: &str) -> Self {
        ProjectionService {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            source_preprocessor: Preprocessor::new(source_language),
            target_preprocessor: OnceCell::new(),
        }
    }

    /// The target-side preprocessor is rarely needed outside projection
    /// requests, so it is built on first use; the init-once cell makes the
    /// first concurrent use race-free.
    fn target_preprocessor(&self) -> &Preprocessor {
        self.target_preprocessor
            .get_or_init(|| Preprocessor::new(&self.target_language))
    }

    /// Project the markup of `sentence` onto `translation`, both given as
    /// raw text in the service's own language direction
    pub fn project(
        &self,
        sentence: &str,
        translation: &str,
        alignment: AlignmentSpec,
    ) -> Result<Translation, ProjectionError> {
        self.project_for(
            &self.source_language,
            &self.target_language,
            sentence,
            translation,
            alignment,
        )
    }

    /// Project with an explicit language pair, accepted in either
    /// direction of the service's pair.
    ///
    /// The alignment is always supplied in the service's own direction;
    /// for an inverted request it is inverted to match the request.
    pub fn project_for(
        &self,
        source_language: &str,
        target_language: &str,
        sentence: &str,
        translation: &str,
        alignment: AlignmentSpec,
    ) -> Result<Translation, ProjectionError> {
        let inverted = self.is_inverted(source_language, target_language)?;
        let begin = Instant::now();

        let (engine_source_text, engine_target_text) = if inverted {
            (translation, sentence)
        } else {
            (sentence, translation)
        };

        let engine_source = self.source_preprocessor.process(engine_source_text)?;
        let engine_target = self.target_preprocessor().process(engine_target_text)?;
        let merged = alignment.resolve();

        let (source, target, alignment) = if inverted {
            (engine_target, engine_source, merged.inverted())
        } else {
            (engine_source, engine_target, merged)
        };
        alignment.validate(source.words().len(), target.words().len())?;

        let mut projected = Translation::from_sentences(source, target, alignment);
        TAG_PROJECTOR.project(&mut projected)?;

        debug!(
            "Total time for tags projection: {} ms",
            begin.elapsed().as_millis()
        );
        Ok(projected)
    }

    fn is_inverted(
        &self,
        source_language: &str,
        target_language: &str,
    ) -> Result<bool, ConfigError> {
        if source_language == self.source_language && target_language == self.target_language {
            Ok(false)
        } else if source_language == self.target_language
            && target_language == self.source_language
        {
            Ok(true)
        } else {
            Err(ConfigError::LanguageNotSupported {
                source: source_language.to_string(),
                target: target_language.to_string(),
            })
        }
    }
}
