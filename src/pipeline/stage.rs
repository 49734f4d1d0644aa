/*!
 * Pipeline stage contract.
 */

use anyhow::Result;
use parking_lot::Mutex;

/// One transformation step in a processing pipeline.
///
/// A stage consumes an item and returns the transformed item. Stages must be
/// callable from any worker thread; a stage that is not safe for concurrent
/// use can be registered through `PipelineBuilder::exclusive_stage`, which
/// serializes its calls.
pub trait PipelineStage<T>: Send + Sync {
    /// Stage identity, used in error reports
    fn name(&self) -> &'static str;

    /// Transform one item. A failure aborts the item's whole pipeline run
    /// and is reported with this stage's name attached.
    fn apply(&self, item: T) -> Result<T>;
}

/// Wrapper serializing every `apply` call of the inner stage through a
/// mutex, for stages holding state that is unsafe to share across workers.
pub(crate) struct ExclusiveStage<T> {
    inner: Box<dyn PipelineStage<T>>,
    lock: Mutex<()>,
}

impl<T> ExclusiveStage<T> {
    pub(crate) fn new(inner: Box<dyn PipelineStage<T>>) -> Self {
        ExclusiveStage {
            inner,
            lock: Mutex::new(()),
        }
    }
}

impl<T: Send> PipelineStage<T> for ExclusiveStage<T> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn apply(&self, item: T) -> Result<T> {
        let _guard = self.lock.lock();
        self.inner.apply(item)
    }
}
