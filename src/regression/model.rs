use serde::Serialize;

use super::Coefficients;

/// The outcome of a regression: the fitted line and its mean squared error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Model {
    pub coefficients: Coefficients,
    pub mse: f64,
    /// The amount of samples the model was fitted on.
    pub samples: usize,
}

impl Model {
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.coefficients.intercept
    }

    #[inline]
    pub fn slope(&self) -> f64 {
        self.coefficients.slope
    }
}
