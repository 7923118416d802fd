use serde::Serialize;

use super::PartialSums;
use crate::error::{RegressionErr, Result};

/// Denominators within this many ulps of `n * sum_x2` are the rounding left
/// over by the closed form's cancellation when every x is the same value.
pub const DEGENERACY_ULPS: f64 = 16.0;

/// The fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coefficients {
    /// The `A` coefficient.
    pub intercept: f64,
    /// The `B` coefficient.
    pub slope: f64,
}

impl Coefficients {
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// Returns the predicted `y` for `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Solves the ordinary least squares normal equations out of the global sums.
    ///
    /// # Arguments
    /// * `n` - The amount of samples the sums were accumulated over.
    /// * `sums` - The reduced sums.
    ///
    /// # Returns
    /// The coefficients, or a degenerate input error if the x values have no
    /// variance (this includes `n <= 1`) or the result isn't finite.
    pub fn solve(n: usize, sums: &PartialSums) -> Result<Self> {
        let n = n as f64;
        let PartialSums {
            sum_x,
            sum_y,
            sum_x2,
            sum_xy,
        } = *sums;

        let denom = n * sum_x2 - sum_x * sum_x;
        if !denom.is_finite() || denom <= DEGENERACY_ULPS * f64::EPSILON * n * sum_x2 {
            return Err(RegressionErr::Degenerate { denom });
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denom;
        let intercept = (sum_y - slope * sum_x) / n;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(RegressionErr::NonFiniteCoefficients { intercept, slope });
        }

        Ok(Self { intercept, slope })
    }
}
