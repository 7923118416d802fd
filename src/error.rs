use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use rayon::ThreadPoolBuildError;

/// The result type used by the regression core.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// Coarse classification of a `RegressionErr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The sample store is empty or malformed, nothing was computed.
    InvalidInput,
    /// The x-values have no variance, the slope is undefined.
    DegenerateInput,
    /// A worker could not be created or did not finish.
    ResourceExhaustion,
}

/// The regression core's error type.
#[derive(Debug)]
pub enum RegressionErr {
    EmptySamples,
    LengthMismatch {
        xs: usize,
        ys: usize,
    },
    NonFiniteSample {
        idx: usize,
    },
    Degenerate {
        denom: f64,
    },
    NonFiniteCoefficients {
        intercept: f64,
        slope: f64,
    },
    Spawn {
        worker_id: usize,
        source: io::Error,
    },
    PoolBuild(ThreadPoolBuildError),
    WorkerPanicked {
        worker_id: usize,
    },
}

impl RegressionErr {
    /// Returns the class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySamples | Self::LengthMismatch { .. } | Self::NonFiniteSample { .. } => {
                ErrorKind::InvalidInput
            }
            Self::Degenerate { .. } | Self::NonFiniteCoefficients { .. } => {
                ErrorKind::DegenerateInput
            }
            Self::Spawn { .. } | Self::PoolBuild(_) | Self::WorkerPanicked { .. } => {
                ErrorKind::ResourceExhaustion
            }
        }
    }
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySamples => write!(f, "invalid input: the sample set is empty"),
            Self::LengthMismatch { xs, ys } => write!(
                f,
                "invalid input: got {xs} x values and {ys} y values, lengths must match"
            ),
            Self::NonFiniteSample { idx } => {
                write!(f, "invalid input: sample {idx} is not a finite number")
            }
            Self::Degenerate { denom } => write!(
                f,
                "degenerate input: the x values have no variance (denominator {denom:e})"
            ),
            Self::NonFiniteCoefficients { intercept, slope } => write!(
                f,
                "degenerate input: coefficients are not finite (A = {intercept}, B = {slope})"
            ),
            Self::Spawn { worker_id, source } => {
                write!(f, "failed to spawn worker {worker_id}: {source}")
            }
            Self::PoolBuild(e) => write!(f, "failed to build the worker pool: {e}"),
            Self::WorkerPanicked { worker_id } => write!(f, "worker {worker_id} panicked"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::PoolBuild(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ThreadPoolBuildError> for RegressionErr {
    fn from(value: ThreadPoolBuildError) -> Self {
        Self::PoolBuild(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(RegressionErr::EmptySamples.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            RegressionErr::LengthMismatch { xs: 1, ys: 2 }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            RegressionErr::Degenerate { denom: 0.0 }.kind(),
            ErrorKind::DegenerateInput
        );
        assert_eq!(
            RegressionErr::WorkerPanicked { worker_id: 3 }.kind(),
            ErrorKind::ResourceExhaustion
        );
    }

    #[test]
    fn spawn_error_keeps_source() {
        let err = RegressionErr::Spawn {
            worker_id: 0,
            source: io::Error::other("out of threads"),
        };

        assert!(err.source().is_some());
        assert!(err.to_string().contains("out of threads"));
    }
}
