use std::num::NonZeroUsize;

use log::{debug, info};

use super::{Coefficients, Model, PartialError, PartialSums};
use crate::{
    data::SampleStore,
    error::Result,
    parallel::{partition, Executor, ThreadExecutor},
};

/// Clamps a requested worker count to a valid one.
///
/// Anything below one becomes one. Counts above the amount of samples are
/// kept as is, the extra workers get empty blocks.
pub fn clamp_workers(requested: i64) -> NonZeroUsize {
    usize::try_from(requested)
        .ok()
        .and_then(NonZeroUsize::new)
        .unwrap_or(NonZeroUsize::MIN)
}

/// Fits a line over a `SampleStore` with two fork-join passes.
///
/// The first pass reduces the per-block sums and solves the coefficients, the
/// second one reduces the squared residuals against them. Both passes use
/// the same blocks.
#[derive(Debug)]
pub struct RegressionEngine<E: Executor> {
    executor: E,
    workers: NonZeroUsize,
}

impl RegressionEngine<ThreadExecutor> {
    /// Creates a new engine spawning fresh threads on every pass.
    pub fn threaded(workers: NonZeroUsize) -> Self {
        Self::new(ThreadExecutor::new(), workers)
    }
}

impl<E: Executor> RegressionEngine<E> {
    /// Creates a new `RegressionEngine`.
    ///
    /// # Arguments
    /// * `executor` - The fork-join strategy both passes run on.
    /// * `workers` - The amount of blocks the samples are split into.
    ///
    /// # Returns
    /// A new `RegressionEngine` instance.
    pub fn new(executor: E, workers: NonZeroUsize) -> Self {
        Self { executor, workers }
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fits the model.
    ///
    /// # Arguments
    /// * `store` - The samples, only borrowed for the duration of the fit.
    ///
    /// # Returns
    /// The fitted `Model`, a degenerate input error if the x values have no
    /// variance or a resource exhaustion error if a pass couldn't run.
    pub fn fit(&self, store: &SampleStore) -> Result<Model> {
        let n = store.len();
        let ranges = partition(n, self.workers.get());
        debug!(
            samples = n,
            workers = ranges.len(),
            executor = self.executor.name();
            "starting regression"
        );

        let sums: PartialSums = self
            .executor
            .run(&ranges, |worker_id, range| {
                let sums = PartialSums::accumulate(store, range.clone());
                debug!(worker_id = worker_id, start = range.start, end = range.end; "sums pass done");
                sums
            })?
            .into_iter()
            .sum();

        let coefficients = Coefficients::solve(n, &sums)?;
        let Coefficients { intercept, slope } = coefficients;
        debug!(intercept = intercept, slope = slope; "coefficients solved");

        let error: PartialError = self
            .executor
            .run(&ranges, |worker_id, range| {
                let error = PartialError::accumulate(store, range.clone(), intercept, slope);
                debug!(worker_id = worker_id, start = range.start, end = range.end; "error pass done");
                error
            })?
            .into_iter()
            .sum();

        let mse = error.sum_sq_err / n as f64;
        info!(intercept = intercept, slope = slope, mse = mse, samples = n; "regression fitted");

        Ok(Model {
            coefficients,
            mse,
            samples: n,
        })
    }
}

/// Fits a line over `store` with `workers` freshly spawned threads per pass.
///
/// # Arguments
/// * `store` - The samples.
/// * `workers` - The requested worker count, clamped with `clamp_workers`.
///
/// # Returns
/// The fitted `Model` or the first error either pass ran into.
pub fn compute_regression(store: &SampleStore, workers: i64) -> Result<Model> {
    RegressionEngine::threaded(clamp_workers(workers)).fit(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, parallel::RayonExecutor};

    fn line(n: usize, a: f64, b: f64) -> SampleStore {
        let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.5 - 10.0).collect();
        let ys = xs.iter().map(|x| a + b * x).collect();
        SampleStore::new(xs, ys).unwrap()
    }

    #[test]
    fn clamping() {
        assert_eq!(clamp_workers(-3).get(), 1);
        assert_eq!(clamp_workers(0).get(), 1);
        assert_eq!(clamp_workers(1).get(), 1);
        assert_eq!(clamp_workers(12).get(), 12);
    }

    #[test]
    fn recovers_exact_line() {
        let store = line(501, -4.0, 0.75);
        let model = compute_regression(&store, 4).unwrap();

        assert!((model.intercept() + 4.0).abs() < 1e-9);
        assert!((model.slope() - 0.75).abs() < 1e-9);
        assert!(model.mse.abs() < 1e-12);
        assert_eq!(model.samples, 501);
    }

    #[test]
    fn rayon_engine_matches_threaded_engine() {
        let store = line(1000, 1.0, -2.0);
        let workers = NonZeroUsize::new(3).unwrap();

        let threaded = RegressionEngine::threaded(workers).fit(&store).unwrap();
        let pooled = RegressionEngine::new(RayonExecutor::new(workers).unwrap(), workers)
            .fit(&store)
            .unwrap();

        assert!((threaded.intercept() - pooled.intercept()).abs() < 1e-12);
        assert!((threaded.slope() - pooled.slope()).abs() < 1e-12);
        assert!((threaded.mse - pooled.mse).abs() < 1e-12);
    }

    #[test]
    fn degenerate_input_stops_before_the_error_pass() {
        let store = SampleStore::new(vec![1.0; 10], (0..10).map(f64::from).collect()).unwrap();
        let err = compute_regression(&store, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }
}
