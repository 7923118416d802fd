mod engine;
mod model;
mod solver;
mod sums;

pub use engine::{clamp_workers, compute_regression, RegressionEngine};
pub use model::Model;
pub use solver::{Coefficients, DEGENERACY_ULPS};
pub use sums::{PartialError, PartialSums};
