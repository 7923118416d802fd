use std::{
    fmt::{self, Display},
    time::Duration,
};

use serde::Serialize;

use crate::regression::Model;

/// Wall clock times of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Timings {
    /// Both fork-join passes plus the solve.
    pub regression: Duration,
    /// Loading, fitting and everything in between.
    pub total: Duration,
}

/// Everything printed after a fit.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub model: Model,
    pub workers: usize,
    pub executor: &'static str,
    pub timings: Timings,
}

impl Report {
    pub fn new(model: Model, workers: usize, executor: &'static str, timings: Timings) -> Self {
        Self {
            model,
            workers,
            executor,
            timings,
        }
    }

    /// Renders the report as pretty printed json.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            model,
            workers,
            executor,
            timings,
        } = self;

        writeln!(f, "=== RESULTS ===")?;
        writeln!(f, "samples: {}", model.samples)?;
        writeln!(f, "workers: {workers} ({executor})")?;
        writeln!(f, "A (intercept): {:.6}", model.intercept())?;
        writeln!(f, "B (slope): {:.6}", model.slope())?;
        writeln!(f, "MSE: {:.6}", model.mse)?;
        writeln!(f)?;
        writeln!(f, "=== TIMINGS ===")?;
        writeln!(f, "regression: {:.6} s", timings.regression.as_secs_f64())?;
        write!(f, "total: {:.6} s", timings.total.as_secs_f64())
    }
}
