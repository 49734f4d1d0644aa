/*!
 * Processing pipeline framework.
 *
 * A pipeline is an ordered list of stages applied to every item flowing
 * through it. Construction goes through a builder that accumulates stages
 * (optional stages may be absent) and a worker count defaulting to the
 * hardware parallelism. Execution over a stream of items runs as a job:
 * stages execute in parallel across items on blocking worker threads, while
 * results reach the sink in the exact order the items were read.
 */

mod job;
mod stage;

use std::sync::Arc;

pub use job::{PipelineSink, PipelineSource, ProcessingJob, VecSink, VecSource};
pub use stage::PipelineStage;

use crate::errors::{ConfigError, PipelineError};
use stage::ExclusiveStage;

/// Worker count used when none is configured
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// An ordered, reusable sequence of transformation stages
pub struct ProcessingPipeline<T: Send + 'static> {
    stages: Arc<Vec<Arc<dyn PipelineStage<T>>>>,
    workers: usize,
}

impl<T: Send + 'static> ProcessingPipeline<T> {
    /// Start building a pipeline
    pub fn builder() -> PipelineBuilder<T> {
        PipelineBuilder::new()
    }

    /// Configured worker count
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run a single item through all stages on the calling thread
    pub fn process(&self, item: T) -> Result<T, PipelineError> {
        job::run_stages(&self.stages, item, None)
    }

    /// Create a job over a source and a sink. The job does not run until
    /// started.
    pub fn create_job(
        &self,
        source: impl PipelineSource<T> + 'static,
        sink: impl PipelineSink<T> + 'static,
    ) -> ProcessingJob<T> {
        ProcessingJob::new(
            self.stages.clone(),
            self.workers,
            Box::new(source),
            Box::new(sink),
        )
    }

    /// Run a batch of items through the pipeline, returning the results in
    /// input order. Fail-fast: the first failing item aborts the batch.
    pub async fn process_batch(&self, items: Vec<T>) -> Result<Vec<T>, PipelineError> {
        let sink = VecSink::new();
        let results = sink.results();

        let mut processing_job = self.create_job(VecSource::new(items), sink);
        processing_job.start();
        processing_job.join().await?;

        let mut buffer = results.lock();
        Ok(std::mem::take(&mut *buffer))
    }
}

impl<T: Send + 'static> Clone for ProcessingPipeline<T> {
    fn clone(&self) -> Self {
        ProcessingPipeline {
            stages: self.stages.clone(),
            workers: self.workers,
        }
    }
}

/// Accumulates stages and configuration for a pipeline
pub struct PipelineBuilder<T: Send + 'static> {
    stages: Vec<Arc<dyn PipelineStage<T>>>,
    workers: usize,
}

impl<T: Send + 'static> PipelineBuilder<T> {
    /// Builder with no stages and the default worker count
    pub fn new() -> Self {
        PipelineBuilder {
            stages: Vec::new(),
            workers: default_workers(),
        }
    }

    /// Append a stage
    pub fn stage(mut self, stage: impl PipelineStage<T> + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Append a stage if present; absent stages are skipped
    pub fn optional_stage(self, stage: Option<impl PipelineStage<T> + 'static>) -> Self {
        match stage {
            Some(stage) => self.stage(stage),
            None => self,
        }
    }

    /// Append a stage whose `apply` calls must not run concurrently; the
    /// pipeline serializes them through a lock
    pub fn exclusive_stage(mut self, stage: impl PipelineStage<T> + 'static) -> Self {
        self.stages
            .push(Arc::new(ExclusiveStage::new(Box::new(stage))));
        self
    }

    /// Set the worker count (validated at build time)
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Build the pipeline; a zero worker count is a configuration error
    pub fn build(self) -> Result<ProcessingPipeline<T>, ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkerCount(self.workers));
        }
        Ok(ProcessingPipeline {
            stages: Arc::new(self.stages),
            workers: self.workers,
        })
    }
}

impl<T: Send + 'static> Default for PipelineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
