//! Ordinary least squares fitting of `y = A + Bx` over a sample set, computed
//! with two fork-join passes: one reducing the sums the normal equations need
//! and one reducing the squared residuals of the fitted line.

pub mod config;
pub mod data;
pub mod error;
pub mod parallel;
pub mod predict;
pub mod regression;
pub mod report;

pub use data::{load_csv, Generator, Noise, SampleStore};
pub use error::{ErrorKind, RegressionErr};
pub use parallel::{Executor, RayonExecutor, ThreadExecutor};
pub use predict::run_prediction_loop;
pub use regression::{clamp_workers, compute_regression, Coefficients, Model, RegressionEngine};
pub use report::{Report, Timings};
