use std::{ops::Range, thread};

use log::debug;

use super::Executor;
use crate::error::{RegressionErr, Result};

/// Spawns one fresh OS thread per block on every call and joins them all
/// before returning.
///
/// Each thread borrows the task and writes only to its own slot of a
/// preallocated output array. A single block runs inline on the calling
/// thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadExecutor;

impl ThreadExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for ThreadExecutor {
    fn name(&self) -> &'static str {
        "threads"
    }

    fn run<T, F>(&self, ranges: &[Range<usize>], task: F) -> Result<Vec<T>>
    where
        T: Default + Send,
        F: Fn(usize, Range<usize>) -> T + Sync,
    {
        if let [range] = ranges {
            return Ok(vec![task(0, range.clone())]);
        }

        let mut slots: Vec<T> = ranges.iter().map(|_| T::default()).collect();
        let task = &task;

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(ranges.len());
            let mut outcome = Ok(());

            for (worker_id, (slot, range)) in slots.iter_mut().zip(ranges).enumerate() {
                let range = range.clone();
                let spawned = thread::Builder::new()
                    .name(format!("linreg-worker-{worker_id}"))
                    .spawn_scoped(scope, move || *slot = task(worker_id, range));

                match spawned {
                    Ok(handle) => handles.push((worker_id, handle)),
                    Err(source) => {
                        outcome = Err(RegressionErr::Spawn { worker_id, source });
                        break;
                    }
                }
            }

            debug!(spawned = handles.len(), expected = ranges.len(); "workers spawned");

            for (worker_id, handle) in handles {
                if handle.join().is_err() && outcome.is_ok() {
                    outcome = Err(RegressionErr::WorkerPanicked { worker_id });
                }
            }

            outcome
        })?;

        Ok(slots)
    }
}
