mod csv;
mod error;
mod generator;
mod store;

pub use csv::{load_csv, read_csv};
pub use error::{DataErr, Result};
pub use generator::{random_seed, write_csv, Generator, Noise};
pub use store::{Sample, SampleStore, SamplesRef};
