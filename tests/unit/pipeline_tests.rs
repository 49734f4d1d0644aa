/*!
 * Tests for the processing pipeline framework: ordered parallel execution,
 * empty streams, fail-fast errors and cancellation.
 */

use anyhow::{Result, anyhow};
use rand::Rng;
use std::time::Duration;

use tagweave::pipeline::{ProcessingPipeline, VecSink, VecSource};
use tagweave::{PipelineError, PipelineStage};

/// Passes items through after a random delay, simulating uneven stage cost
struct Jitter;

impl PipelineStage<u64> for Jitter {
    fn name(&self) -> &'static str {
        "jitter"
    }

    fn apply(&self, item: u64) -> Result<u64> {
        let millis = rand::rng().random_range(0..15);
        std::thread::sleep(Duration::from_millis(millis));
        Ok(item)
    }
}

struct Double;

impl PipelineStage<u64> for Double {
    fn name(&self) -> &'static str {
        "double"
    }

    fn apply(&self, item: u64) -> Result<u64> {
        Ok(item * 2)
    }
}

/// Fixed per-item delay, long enough to interrupt a job before any result
struct Hold(u64);

impl PipelineStage<u64> for Hold {
    fn name(&self) -> &'static str {
        "hold"
    }

    fn apply(&self, item: u64) -> Result<u64> {
        std::thread::sleep(Duration::from_millis(self.0));
        Ok(item)
    }
}

struct RejectOdd;

impl PipelineStage<u64> for RejectOdd {
    fn name(&self) -> &'static str {
        "reject-odd"
    }

    fn apply(&self, item: u64) -> Result<u64> {
        if item % 2 == 1 {
            Err(anyhow!("odd item: {}", item))
        } else {
            Ok(item)
        }
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_orderedOutput_shouldHoldForAllBatchSizes() {
    let pipeline = ProcessingPipeline::builder()
        .stage(Jitter)
        .stage(Double)
        .workers(4)
        .build()
        .unwrap();

    for n in [0usize, 1, 2, 7, 33] {
        let items: Vec<u64> = (0..n as u64).collect();
        let expected: Vec<u64> = items.iter().map(|i| i * 2).collect();
        let results = pipeline.process_batch(items).await.unwrap();
        assert_eq!(results, expected, "batch size {}", n);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_singleWorker_shouldStillDrainEverything() {
    let pipeline = ProcessingPipeline::builder()
        .stage(Double)
        .workers(1)
        .build()
        .unwrap();

    let results = pipeline.process_batch((0..20).collect()).await.unwrap();
    assert_eq!(results.len(), 20);
    assert_eq!(results[19], 38);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failFast_shouldSurfaceStageIdentity() {
    let pipeline = ProcessingPipeline::builder()
        .stage(RejectOdd)
        .workers(2)
        .build()
        .unwrap();

    let error = pipeline
        .process_batch(vec![0, 2, 4, 5, 6])
        .await
        .unwrap_err();
    match error {
        PipelineError::Stage { stage, source } => {
            assert_eq!(stage, "reject-odd");
            assert!(source.to_string().contains("5"));
        }
        other => panic!("expected stage error, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_interrupt_beforeFirstResult_shouldCancelCleanly() {
    let pipeline = ProcessingPipeline::builder()
        .stage(Hold(100))
        .workers(2)
        .build()
        .unwrap();

    let sink: VecSink<u64> = VecSink::new();
    let results = sink.results();

    let mut job = pipeline.create_job(VecSource::new((0..500).collect()), sink);
    job.start();
    job.interrupt();

    assert!(matches!(job.join().await, Err(PipelineError::Cancelled)));
    assert!(results.lock().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_interrupt_midRun_shouldNotEmitAfterObserved() {
    let pipeline = ProcessingPipeline::builder()
        .stage(Jitter)
        .workers(2)
        .build()
        .unwrap();

    let sink: VecSink<u64> = VecSink::new();
    let results = sink.results();

    let mut job = pipeline.create_job(VecSource::new((0..500).collect()), sink);
    job.start();
    tokio::time::sleep(Duration::from_millis(40)).await;
    job.interrupt();

    assert!(matches!(job.join().await, Err(PipelineError::Cancelled)));

    // The interrupt lands mid-run: whatever was emitted before it is an
    // ordered prefix, and far from the whole input
    let emitted = results.lock();
    let count = emitted.len();
    assert!(count < 500);
    assert_eq!(*emitted, (0..count as u64).collect::<Vec<u64>>());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_join_withoutStart_shouldRunTheJob() {
    let pipeline = ProcessingPipeline::builder()
        .stage(Double)
        .build()
        .unwrap();

    let sink: VecSink<u64> = VecSink::new();
    let results = sink.results();

    let job = pipeline.create_job(VecSource::new(vec![1, 2]), sink);
    job.join().await.unwrap();
    assert_eq!(*results.lock(), vec![2, 4]);
}
