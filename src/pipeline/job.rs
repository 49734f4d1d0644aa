/*!
 * Pipeline jobs: one execution run over a stream of items.
 *
 * A job pulls items from a source, runs every stage over every item on a
 * bounded pool of blocking workers, and writes results to a sink in the
 * exact order the items were read, whatever order the workers finish in.
 * Interrupting a job aborts outstanding work and makes `join` report
 * cancellation instead of success.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::errors::PipelineError;
use crate::pipeline::stage::PipelineStage;

/// Pull-style producer feeding a pipeline job; `None` signals exhaustion
pub trait PipelineSource<T>: Send {
    /// Next item, or `None` when the stream is exhausted
    fn read(&mut self) -> Option<T>;
}

/// Receiver of pipeline results, called once per input in input order
pub trait PipelineSink<T>: Send {
    /// Accept one finished item. A failure aborts the job.
    fn write(&mut self, item: T) -> Result<()>;
}

/// Source over an owned vector of items
pub struct VecSource<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> VecSource<T> {
    /// Source yielding the items in vector order
    pub fn new(items: Vec<T>) -> Self {
        VecSource {
            items: items.into_iter(),
        }
    }
}

impl<T: Send> PipelineSource<T> for VecSource<T> {
    fn read(&mut self) -> Option<T> {
        self.items.next()
    }
}

/// Sink collecting results into a shared vector
pub struct VecSink<T> {
    results: Arc<Mutex<Vec<T>>>,
}

impl<T> VecSink<T> {
    /// Empty sink
    pub fn new() -> Self {
        VecSink {
            results: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the result buffer, readable after the job is joined
    pub fn results(&self) -> Arc<Mutex<Vec<T>>> {
        self.results.clone()
    }
}

impl<T> Default for VecSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> PipelineSink<T> for VecSink<T> {
    fn write(&mut self, item: T) -> Result<()> {
        self.results.lock().push(item);
        Ok(())
    }
}

/// Run every stage over one item, checking the interrupt flag between
/// stages so a cancelled job stops doing work as soon as possible.
pub(crate) fn run_stages<T>(
    stages: &[Arc<dyn PipelineStage<T>>],
    mut item: T,
    cancelled: Option<&AtomicBool>,
) -> Result<T, PipelineError> {
    for stage in stages {
        if let Some(flag) = cancelled {
            if flag.load(Ordering::SeqCst) {
                return Err(PipelineError::Cancelled);
            }
        }
        item = stage
            .apply(item)
            .map_err(|source| PipelineError::Stage {
                stage: stage.name(),
                source,
            })?;
    }
    Ok(item)
}

enum JobState<T: Send + 'static> {
    Pending {
        stages: Arc<Vec<Arc<dyn PipelineStage<T>>>>,
        workers: usize,
        source: Box<dyn PipelineSource<T>>,
        sink: Box<dyn PipelineSink<T>>,
    },
    Running(JoinHandle<Result<(), PipelineError>>),
    Finished,
}

/// Handle for one pipeline run.
///
/// `start` launches the run on the async runtime, `join` waits for every
/// item to drain (or the first unrecovered error), `interrupt` aborts
/// outstanding work. Cancellation takes precedence over any in-flight stage
/// error in what `join` reports.
pub struct ProcessingJob<T: Send + 'static> {
    cancelled: Arc<AtomicBool>,
    state: JobState<T>,
}

impl<T: Send + 'static> ProcessingJob<T> {
    pub(crate) fn new(
        stages: Arc<Vec<Arc<dyn PipelineStage<T>>>>,
        workers: usize,
        source: Box<dyn PipelineSource<T>>,
        sink: Box<dyn PipelineSink<T>>,
    ) -> Self {
        ProcessingJob {
            cancelled: Arc::new(AtomicBool::new(false)),
            state: JobState::Pending {
                stages,
                workers,
                source,
                sink,
            },
        }
    }

    /// Launch the run. Idempotent; `join` starts the job if needed.
    pub fn start(&mut self) {
        if !matches!(self.state, JobState::Pending { .. }) {
            return;
        }
        let JobState::Pending {
            stages,
            workers,
            source,
            sink,
        } = std::mem::replace(&mut self.state, JobState::Finished)
        else {
            unreachable!()
        };
        let cancelled = self.cancelled.clone();
        self.state = JobState::Running(tokio::spawn(drive(
            stages, workers, source, sink, cancelled,
        )));
    }

    /// Request cancellation of the run
    pub fn interrupt(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Wait until every item is drained and every result delivered.
    ///
    /// Returns the first stage error if an item failed, or
    /// `PipelineError::Cancelled` if the job was interrupted.
    pub async fn join(mut self) -> Result<(), PipelineError> {
        self.start();
        match std::mem::replace(&mut self.state, JobState::Finished) {
            JobState::Running(handle) => match handle.await {
                Ok(result) => result,
                Err(join_error) if join_error.is_panic() => {
                    Err(PipelineError::WorkerPanic(join_error.to_string()))
                }
                Err(_) => Err(PipelineError::Cancelled),
            },
            _ => Ok(()),
        }
    }
}

/// The job driver: pull, fan out to blocking workers, emit in input order.
async fn drive<T: Send + 'static>(
    stages: Arc<Vec<Arc<dyn PipelineStage<T>>>>,
    workers: usize,
    mut source: Box<dyn PipelineSource<T>>,
    mut sink: Box<dyn PipelineSink<T>>,
    cancelled: Arc<AtomicBool>,
) -> Result<(), PipelineError> {
    let reader_cancelled = cancelled.clone();
    let reader = std::iter::from_fn(move || {
        if reader_cancelled.load(Ordering::SeqCst) {
            None
        } else {
            source.read()
        }
    });

    // `buffered` caps in-flight items at the worker count (back-pressure)
    // and yields completions in input order regardless of finish order.
    let mut results = stream::iter(reader)
        .map(|item| {
            let stages = stages.clone();
            let cancelled = cancelled.clone();
            tokio::task::spawn_blocking(move || run_stages(&stages, item, Some(&cancelled)))
        })
        .buffered(workers.max(1));

    while let Some(joined) = results.next().await {
        let outcome = match joined {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => {
                Err(PipelineError::WorkerPanic(join_error.to_string()))
            }
            Err(_) => Err(PipelineError::Cancelled),
        };

        if cancelled.load(Ordering::SeqCst) {
            return Err(PipelineError::Cancelled);
        }

        let item = outcome?;
        sink.write(item).map_err(|source| PipelineError::Stage {
            stage: "output",
            source,
        })?;
    }

    if cancelled.load(Ordering::SeqCst) {
        return Err(PipelineError::Cancelled);
    }
    Ok(())
}
