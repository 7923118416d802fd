use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use crate::error::RegressionErr;

/// The result type used by the data collaborators.
pub type Result<T> = std::result::Result<T, DataErr>;

/// Errors raised while loading, generating or writing sample sets.
#[derive(Debug)]
pub enum DataErr {
    Io(io::Error),
    MissingHeader,
    Distribution(String),
    Store(RegressionErr),
}

impl Display for DataErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataErr::Io(e) => write!(f, "io error: {e}"),
            DataErr::MissingHeader => write!(f, "the input is empty, expected an `x,y` header"),
            DataErr::Distribution(msg) => write!(f, "invalid noise distribution: {msg}"),
            DataErr::Store(e) => write!(f, "{e}"),
        }
    }
}

impl Error for DataErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataErr::Io(e) => Some(e),
            DataErr::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DataErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RegressionErr> for DataErr {
    fn from(value: RegressionErr) -> Self {
        Self::Store(value)
    }
}

impl From<rand_distr::uniform::Error> for DataErr {
    fn from(value: rand_distr::uniform::Error) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<rand_distr::NormalError> for DataErr {
    fn from(value: rand_distr::NormalError) -> Self {
        Self::Distribution(value.to_string())
    }
}
