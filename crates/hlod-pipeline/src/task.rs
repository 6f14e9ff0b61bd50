//! Handle to a background build task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::Receiver;

use hlod_core::{AssetId, BuildState, BuildWarning, HlodError};

use crate::state::Operation;

/// Progress event emitted by the build worker at phase boundaries and after
/// each group of per-group work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildProgress {
    /// Phase the worker is in.
    pub phase: BuildState,
    /// Groups finished within the current phase.
    pub groups_done: usize,
    /// Groups the current phase will process in total.
    pub groups_total: usize,
}

/// Summary of a completed build, returned by [`BuildTask::wait`].
#[derive(Clone, Debug)]
pub struct BuildReport {
    /// Operation the task ran.
    pub operation: Operation,
    /// Partition groups in the hierarchy (inner nodes included).
    pub groups: usize,
    /// Batches produced across all leaf groups.
    pub batches: usize,
    /// Triangles fed into batching.
    pub input_triangles: usize,
    /// Triangles in the packaged low root.
    pub output_triangles: usize,
    /// Soft degradations collected along the way.
    pub warnings: Vec<BuildWarning>,
    /// Wall-clock duration of the worker.
    pub elapsed: Duration,
}

/// Caller-side handle to a build running on a background thread.
///
/// Dropping the handle does not cancel the task; the worker finishes (or
/// fails) and records its outcome on the asset either way.
pub struct BuildTask {
    asset: AssetId,
    operation: Operation,
    cancel: Arc<AtomicBool>,
    progress: Receiver<BuildProgress>,
    result: Receiver<Result<BuildReport, HlodError>>,
}

impl BuildTask {
    pub(crate) fn new(
        asset: AssetId,
        operation: Operation,
        cancel: Arc<AtomicBool>,
        progress: Receiver<BuildProgress>,
        result: Receiver<Result<BuildReport, HlodError>>,
    ) -> Self {
        Self {
            asset,
            operation,
            cancel,
            progress,
            result,
        }
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Requests cancellation. The worker honors the request at its next
    /// suspension point; the asset then ends up `Failed` with a cancellation
    /// reason, and whatever roots existed before the task started are left
    /// untouched (none for a cancelled first generate).
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Drains all progress events received so far without blocking.
    pub fn drain_progress(&self) -> Vec<BuildProgress> {
        let mut events = Vec::new();
        while let Ok(event) = self.progress.try_recv() {
            events.push(event);
        }
        events
    }

    /// Blocks until the worker reports its result.
    ///
    /// # Errors
    ///
    /// Returns the worker's own error ([`HlodError::Cancelled`],
    /// [`HlodError::BatchingFailed`], ...), or
    /// [`HlodError::WorkerDisconnected`] if the worker terminated without
    /// reporting.
    pub fn wait(self) -> Result<BuildReport, HlodError> {
        self.result
            .recv()
            .map_err(|_| HlodError::WorkerDisconnected)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};

    fn task_pair() -> (
        BuildTask,
        crossbeam_channel::Sender<BuildProgress>,
        crossbeam_channel::Sender<Result<BuildReport, HlodError>>,
    ) {
        let (progress_tx, progress_rx) = unbounded();
        let (result_tx, result_rx) = bounded(1);
        let task = BuildTask::new(
            AssetId(7),
            Operation::Generate,
            Arc::new(AtomicBool::new(false)),
            progress_rx,
            result_rx,
        );
        (task, progress_tx, result_tx)
    }

    #[test]
    fn test_cancel_sets_the_shared_flag() {
        let (task, _progress, _result) = task_pair();
        assert!(!task.is_cancel_requested());
        task.cancel();
        assert!(task.is_cancel_requested());
    }

    #[test]
    fn test_drain_progress_is_non_blocking() {
        let (task, progress, _result) = task_pair();
        assert!(task.drain_progress().is_empty());

        progress
            .send(BuildProgress {
                phase: BuildState::Batching,
                groups_done: 1,
                groups_total: 4,
            })
            .unwrap();
        let events = task.drain_progress();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, BuildState::Batching);
    }

    #[test]
    fn test_wait_maps_disconnect_to_error() {
        let (task, _progress, result) = task_pair();
        drop(result);
        assert!(matches!(task.wait(), Err(HlodError::WorkerDisconnected)));
    }

    #[test]
    fn test_wait_returns_worker_result() {
        let (task, _progress, result) = task_pair();
        result
            .send(Ok(BuildReport {
                operation: Operation::Generate,
                groups: 3,
                batches: 2,
                input_triangles: 100,
                output_triangles: 25,
                warnings: Vec::new(),
                elapsed: Duration::from_millis(5),
            }))
            .unwrap();
        let report = task.wait().unwrap();
        assert_eq!(report.groups, 3);
        assert_eq!(report.output_triangles, 25);
    }
}
