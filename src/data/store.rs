use std::ops::Range;

use crate::error::{RegressionErr, Result};

/// A single observation (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// The in-memory sample set a regression runs over.
///
/// It owns two parallel buffers of the same, non-zero length holding only
/// finite values. Once built it is never mutated, so workers can borrow
/// disjoint ranges of it concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleStore {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleStore {
    /// Creates a new `SampleStore` from owned buffers.
    ///
    /// # Arguments
    /// * `xs` - The independent variable.
    /// * `ys` - The dependent variable, `ys[i]` pairs with `xs[i]`.
    ///
    /// # Returns
    /// A new `SampleStore` or an invalid input error if the buffers are empty,
    /// have different lengths or hold a non-finite value.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(RegressionErr::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        if xs.is_empty() {
            return Err(RegressionErr::EmptySamples);
        }

        if let Some(idx) = xs
            .iter()
            .zip(&ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(RegressionErr::NonFiniteSample { idx });
        }

        Ok(Self { xs, ys })
    }

    /// Builds a store out of a sequence of samples.
    pub fn from_samples<I>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = Sample>,
    {
        let (xs, ys) = samples.into_iter().map(|s| (s.x, s.y)).unzip();
        Self::new(xs, ys)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always `false`, an empty store can't be built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Borrows the samples inside `range` (panics if out of bounds).
    #[inline]
    pub fn view(&self, range: Range<usize>) -> SamplesRef<'_> {
        SamplesRef {
            xs: &self.xs[range.clone()],
            ys: &self.ys[range],
        }
    }

    /// Iterates over every sample in index order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.view(0..self.len()).iter()
    }
}

/// Borrowed contiguous block of a `SampleStore` (zero-copy).
#[derive(Debug, Clone, Copy)]
pub struct SamplesRef<'a> {
    pub xs: &'a [f64],
    pub ys: &'a [f64],
}

impl<'a> SamplesRef<'a> {
    /// Iterates over the block in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Sample> + 'a {
        self.xs
            .iter()
            .zip(self.ys)
            .map(|(&x, &y)| Sample { x, y })
    }
}
