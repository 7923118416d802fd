use std::{
    iter::Sum,
    ops::{Add, AddAssign, Range},
};

use crate::data::SampleStore;

/// The four running sums a block contributes to the fit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialSums {
    pub sum_x: f64,
    pub sum_y: f64,
    pub sum_x2: f64,
    pub sum_xy: f64,
}

impl PartialSums {
    /// Scans `range` of `store` once, in ascending index order.
    ///
    /// An empty range yields the zero sums.
    pub fn accumulate(store: &SampleStore, range: Range<usize>) -> Self {
        let block = store.view(range);

        let mut sums = Self::default();
        for (&x, &y) in block.xs.iter().zip(block.ys) {
            sums.sum_x += x;
            sums.sum_y += y;
            sums.sum_x2 += x * x;
            sums.sum_xy += x * y;
        }

        sums
    }
}

impl Add for PartialSums {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for PartialSums {
    fn add_assign(&mut self, rhs: Self) {
        self.sum_x += rhs.sum_x;
        self.sum_y += rhs.sum_y;
        self.sum_x2 += rhs.sum_x2;
        self.sum_xy += rhs.sum_xy;
    }
}

impl Sum for PartialSums {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// The squared residuals a block contributes to the error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialError {
    pub sum_sq_err: f64,
}

impl PartialError {
    /// Accumulates `(y - (intercept + slope * x))²` over `range` of `store`.
    pub fn accumulate(store: &SampleStore, range: Range<usize>, intercept: f64, slope: f64) -> Self {
        let block = store.view(range);

        let sum_sq_err = block
            .xs
            .iter()
            .zip(block.ys)
            .fold(0.0, |acc, (&x, &y)| {
                let err = y - (intercept + slope * x);
                acc + err * err
            });

        Self { sum_sq_err }
    }
}

impl Add for PartialError {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            sum_sq_err: self.sum_sq_err + rhs.sum_sq_err,
        }
    }
}

impl Sum for PartialError {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
