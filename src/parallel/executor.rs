use std::ops::Range;

use crate::error::Result;

/// A fork-join strategy: runs one task per index range and hands back every
/// task's output once all of them have finished.
///
/// Implementations must return the outputs in range order, so that
/// `outputs[i]` is the result of `task(i, ranges[i])`, and must only return
/// after every task has completed. A task owns its output until then, no two
/// tasks ever write to the same slot.
pub trait Executor {
    /// A short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Runs `task` once per range and joins them all.
    ///
    /// # Arguments
    /// * `ranges` - The blocks to process, one task per block.
    /// * `task` - The task, called with the worker id and its block.
    ///
    /// # Returns
    /// One output per range, or a resource exhaustion error if a worker
    /// couldn't be created or didn't finish.
    fn run<T, F>(&self, ranges: &[Range<usize>], task: F) -> Result<Vec<T>>
    where
        T: Default + Send,
        F: Fn(usize, Range<usize>) -> T + Sync;
}
