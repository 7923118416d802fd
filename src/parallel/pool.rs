use std::{
    num::NonZeroUsize,
    ops::Range,
    panic::{self, AssertUnwindSafe},
};

use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};

use super::Executor;
use crate::error::{RegressionErr, Result};

/// Runs the blocks on a dedicated rayon pool with a fixed amount of threads.
///
/// The pool is built once and reused by every call. Outputs are written to
/// per-block slots, a panicking task is reported instead of unwinding into
/// the caller.
pub struct RayonExecutor {
    pool: ThreadPool,
}

impl RayonExecutor {
    /// Creates a new `RayonExecutor`.
    ///
    /// # Arguments
    /// * `threads` - The amount of threads in the pool.
    ///
    /// # Returns
    /// A new `RayonExecutor` or a resource exhaustion error if the pool's
    /// threads couldn't be spawned.
    pub fn new(threads: NonZeroUsize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|idx| format!("linreg-pool-{idx}"))
            .build()?;

        Ok(Self { pool })
    }

    /// Returns the amount of threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for RayonExecutor {
    fn name(&self) -> &'static str {
        "rayon"
    }

    fn run<T, F>(&self, ranges: &[Range<usize>], task: F) -> Result<Vec<T>>
    where
        T: Default + Send,
        F: Fn(usize, Range<usize>) -> T + Sync,
    {
        let mut slots: Vec<T> = ranges.iter().map(|_| T::default()).collect();

        self.pool.install(|| {
            slots
                .par_iter_mut()
                .zip(ranges.par_iter())
                .enumerate()
                .try_for_each(|(worker_id, (slot, range))| {
                    *slot = panic::catch_unwind(AssertUnwindSafe(|| task(worker_id, range.clone())))
                        .map_err(|_| RegressionErr::WorkerPanicked { worker_id })?;
                    Ok::<_, RegressionErr>(())
                })
        })?;

        Ok(slots)
    }
}

impl std::fmt::Debug for RayonExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RayonExecutor")
            .field("threads", &self.threads())
            .finish()
    }
}
