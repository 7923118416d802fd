use std::io::Write;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};

use super::{Result, Sample, SampleStore};

/// The noise added on top of the exact line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Noise {
    None,
    /// Uniform noise in `[-amplitude, amplitude]`.
    Uniform { amplitude: f64 },
    /// Zero mean gaussian noise.
    Normal { std_dev: f64 },
}

/// Synthetic sample generator following `y = intercept + slope * x + noise`.
///
/// The i-th sample has `x = i * step`, so x grows monotonically.
#[derive(Debug, Clone)]
pub struct Generator {
    pub intercept: f64,
    pub slope: f64,
    pub step: f64,
    pub noise: Noise,
    pub seed: Option<u64>,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            intercept: 2.0,
            slope: 3.5,
            step: 0.1,
            noise: Noise::None,
            seed: None,
        }
    }
}

impl Generator {
    /// Creates a new `Generator` for the default line `y = 2 + 3.5x`.
    ///
    /// # Arguments
    /// * `noise` - The noise added to every y value.
    /// * `seed` - An optional seed, the OS entropy source is used otherwise.
    pub fn new(noise: Noise, seed: Option<u64>) -> Self {
        Self {
            noise,
            seed,
            ..Self::default()
        }
    }

    /// Generates `n` samples.
    ///
    /// # Returns
    /// The generated `SampleStore`, an error if the noise parameters are
    /// invalid or `n` is zero.
    pub fn generate(&self, n: usize) -> Result<SampleStore> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let samples: Vec<_> = match self.noise {
            Noise::None => self.samples(n, |_| 0.0).collect(),
            Noise::Uniform { amplitude } => {
                let dist = Uniform::<f64>::new_inclusive(-amplitude, amplitude)?;
                self.samples(n, |_| dist.sample(&mut rng)).collect()
            }
            Noise::Normal { std_dev } => {
                let dist = Normal::new(0.0, std_dev)?;
                self.samples(n, |_| dist.sample(&mut rng)).collect()
            }
        };

        Ok(SampleStore::from_samples(samples)?)
    }

    fn samples<'a, F>(&'a self, n: usize, mut noise: F) -> impl Iterator<Item = Sample> + 'a
    where
        F: FnMut(usize) -> f64 + 'a,
    {
        (0..n).map(move |i| {
            let x = i as f64 * self.step;
            Sample {
                x,
                y: self.intercept + self.slope * x + noise(i),
            }
        })
    }
}

/// Writes a sample set as CSV with an `x,y` header and six decimals per value.
pub fn write_csv<W: Write>(store: &SampleStore, mut out: W) -> Result<()> {
    writeln!(out, "x,y")?;
    for Sample { x, y } in store.iter() {
        writeln!(out, "{x:.6},{y:.6}")?;
    }

    out.flush()?;
    Ok(())
}

/// Draws a fresh seed from the thread local generator.
pub fn random_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{read_csv, DataErr};

    #[test]
    fn noiseless_samples_lie_on_the_line() {
        let store = Generator::default().generate(5).unwrap();

        assert_eq!(store.len(), 5);
        for (i, sample) in store.iter().enumerate() {
            let x = i as f64 * 0.1;
            assert_eq!(sample.x, x);
            assert_eq!(sample.y, 2.0 + 3.5 * x);
        }
    }

    #[test]
    fn uniform_noise_is_bounded() {
        let generator = Generator::new(Noise::Uniform { amplitude: 0.5 }, Some(7));
        let store = generator.generate(1000).unwrap();

        for sample in store.iter() {
            let residual = sample.y - (2.0 + 3.5 * sample.x);
            assert!(residual.abs() <= 0.5 + 1e-12, "residual {residual} out of bounds");
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let generator = Generator::new(Noise::Normal { std_dev: 1.0 }, Some(42));
        assert_eq!(generator.generate(100).unwrap(), generator.generate(100).unwrap());
    }

    #[test]
    fn invalid_noise_is_rejected() {
        let generator = Generator::new(Noise::Normal { std_dev: f64::NAN }, Some(1));
        assert!(matches!(generator.generate(10), Err(DataErr::Distribution(_))));

        let generator = Generator::new(Noise::Uniform { amplitude: -1.0 }, Some(1));
        assert!(matches!(generator.generate(10), Err(DataErr::Distribution(_))));
    }

    #[test]
    fn written_csv_reads_back() {
        let store = Generator::default().generate(20).unwrap();

        let mut buf = Vec::new();
        write_csv(&store, &mut buf).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("x,y\n0.000000,2.000000\n"));

        let read = read_csv(buf.as_slice()).unwrap();
        assert_eq!(read.len(), 20);
        for (a, b) in read.iter().zip(store.iter()) {
            assert!((a.x - b.x).abs() < 1e-6);
            assert!((a.y - b.y).abs() < 1e-6);
        }
    }
}
