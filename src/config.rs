use std::{
    error::Error,
    fmt::{self, Display},
    num::NonZeroUsize,
    path::PathBuf,
    str::FromStr,
    thread,
};

use crate::{data::Noise, regression::clamp_workers};

pub const WORKERS_VAR: &str = "LINREG_WORKERS";
pub const EXECUTOR_VAR: &str = "LINREG_EXECUTOR";
pub const FORMAT_VAR: &str = "LINREG_FORMAT";
pub const INTERACTIVE_VAR: &str = "LINREG_INTERACTIVE";

pub const USAGE: &str = "\
usage:
  linreg fit <file.csv> [workers]
  linreg generate <out.csv> <samples> [noise] [seed]

noise is an amplitude for uniform noise, or `uniform:<amp>` / `normal:<std_dev>`

environment:
  LINREG_WORKERS      default worker count
  LINREG_EXECUTOR     threads | rayon
  LINREG_FORMAT       text | json
  LINREG_INTERACTIVE  set to 0 or false to skip the prediction loop
  RUST_LOG            log filter";

/// The configuration module's result type.
pub type Result<T> = std::result::Result<T, ConfigErr>;

/// Invalid command line or environment configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigErr {
    Usage(String),
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Usage(msg) => write!(f, "{msg}\n\n{USAGE}"),
            ConfigErr::InvalidValue { key, value } => write!(f, "invalid value for {key}: '{value}'"),
        }
    }
}

impl Error for ConfigErr {}

/// Which fork-join strategy the regression runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutorKind {
    #[default]
    Threads,
    Rayon,
}

impl FromStr for ExecutorKind {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "threads" | "thread" => Ok(Self::Threads),
            "rayon" | "pool" => Ok(Self::Rayon),
            _ => Err(ConfigErr::InvalidValue {
                key: EXECUTOR_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// How the results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigErr::InvalidValue {
                key: FORMAT_VAR,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    pub input: PathBuf,
    pub workers: NonZeroUsize,
    pub executor: ExecutorKind,
    pub format: ReportFormat,
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    pub output: PathBuf,
    pub samples: usize,
    pub noise: Noise,
    pub seed: Option<u64>,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fit(FitConfig),
    Generate(GenerateConfig),
}

impl Command {
    /// Builds the command out of the process arguments and environment.
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Builds the command out of explicit arguments and an environment lookup.
    ///
    /// # Arguments
    /// * `args` - The arguments, without the program name.
    /// * `env` - Returns the value of an environment variable, if set.
    ///
    /// # Returns
    /// The parsed `Command` or a `ConfigErr` describing the first problem found.
    pub fn parse<I, E>(args: I, env: E) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let Some((mode, rest)) = args.split_first() else {
            return Err(ConfigErr::Usage("missing mode".into()));
        };

        match mode.as_str() {
            "fit" => parse_fit(rest, &env).map(Self::Fit),
            "generate" => parse_generate(rest).map(Self::Generate),
            other => Err(ConfigErr::Usage(format!(
                "unknown mode '{other}', expected 'fit' or 'generate'"
            ))),
        }
    }
}

fn parse_fit<E>(args: &[String], env: &E) -> Result<FitConfig>
where
    E: Fn(&str) -> Option<String>,
{
    let (input, workers) = match args {
        [input] => (input, None),
        [input, workers] => (input, Some(workers.clone())),
        _ => return Err(ConfigErr::Usage("fit expects <file.csv> [workers]".into())),
    };

    let workers = match workers.or_else(|| env(WORKERS_VAR)) {
        Some(raw) => clamp_workers(raw.trim().parse().map_err(|_| ConfigErr::InvalidValue {
            key: WORKERS_VAR,
            value: raw.clone(),
        })?),
        None => thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
    };

    let executor = env(EXECUTOR_VAR)
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or_default();

    let format = env(FORMAT_VAR)
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or_default();

    let interactive = match env(INTERACTIVE_VAR) {
        None => true,
        Some(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(ConfigErr::InvalidValue {
                    key: INTERACTIVE_VAR,
                    value: v,
                })
            }
        },
    };

    Ok(FitConfig {
        input: PathBuf::from(input),
        workers,
        executor,
        format,
        interactive,
    })
}

fn parse_generate(args: &[String]) -> Result<GenerateConfig> {
    let (output, samples, noise, seed) = match args {
        [output, samples] => (output, samples, None, None),
        [output, samples, noise] => (output, samples, Some(noise), None),
        [output, samples, noise, seed] => (output, samples, Some(noise), Some(seed)),
        _ => {
            return Err(ConfigErr::Usage(
                "generate expects <out.csv> <samples> [noise] [seed]".into(),
            ))
        }
    };

    let samples = samples
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| ConfigErr::InvalidValue {
            key: "samples",
            value: samples.clone(),
        })?;

    let noise = noise.map(|n| parse_noise(n)).transpose()?.unwrap_or(Noise::None);

    let seed = seed
        .map(|s| {
            s.trim().parse::<u64>().map_err(|_| ConfigErr::InvalidValue {
                key: "seed",
                value: s.clone(),
            })
        })
        .transpose()?;

    Ok(GenerateConfig {
        output: PathBuf::from(output),
        samples,
        noise,
        seed,
    })
}

fn parse_noise(raw: &str) -> Result<Noise> {
    let invalid = || ConfigErr::InvalidValue {
        key: "noise",
        value: raw.to_string(),
    };

    let (kind, value) = raw.split_once(':').unwrap_or(("uniform", raw));
    let value: f64 = value.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    let noise = match kind.trim() {
        "uniform" => Noise::Uniform { amplitude: value },
        "normal" => Noise::Normal { std_dev: value },
        _ => return Err(invalid()),
    };

    Ok(if value == 0.0 { Noise::None } else { noise })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Command::parse(args.iter().map(|s| s.to_string()), |key| env.get(key).cloned())
    }

    fn fit(args: &[&str], env: &[(&str, &str)]) -> FitConfig {
        match parse(args, env).unwrap() {
            Command::Fit(cfg) => cfg,
            other => panic!("expected fit, got {other:?}"),
        }
    }

    #[test]
    fn fit_with_explicit_workers() {
        let cfg = fit(&["fit", "data.csv", "8"], &[]);

        assert_eq!(cfg.input, PathBuf::from("data.csv"));
        assert_eq!(cfg.workers.get(), 8);
        assert_eq!(cfg.executor, ExecutorKind::Threads);
        assert_eq!(cfg.format, ReportFormat::Text);
        assert!(cfg.interactive);
    }

    #[test]
    fn non_positive_workers_are_clamped() {
        assert_eq!(fit(&["fit", "data.csv", "0"], &[]).workers.get(), 1);
        assert_eq!(fit(&["fit", "data.csv", "-4"], &[]).workers.get(), 1);
    }

    #[test]
    fn environment_defaults() {
        let cfg = fit(
            &["fit", "data.csv"],
            &[
                (WORKERS_VAR, "3"),
                (EXECUTOR_VAR, "rayon"),
                (FORMAT_VAR, "JSON"),
                (INTERACTIVE_VAR, "false"),
            ],
        );

        assert_eq!(cfg.workers.get(), 3);
        assert_eq!(cfg.executor, ExecutorKind::Rayon);
        assert_eq!(cfg.format, ReportFormat::Json);
        assert!(!cfg.interactive);
    }

    #[test]
    fn argument_beats_environment() {
        let cfg = fit(&["fit", "data.csv", "2"], &[(WORKERS_VAR, "16")]);
        assert_eq!(cfg.workers.get(), 2);
    }

    #[test]
    fn invalid_values() {
        assert_eq!(
            parse(&["fit", "data.csv", "many"], &[]),
            Err(ConfigErr::InvalidValue {
                key: WORKERS_VAR,
                value: "many".into()
            })
        );
        assert!(matches!(
            parse(&["fit", "data.csv"], &[(EXECUTOR_VAR, "gpu")]),
            Err(ConfigErr::InvalidValue { key: EXECUTOR_VAR, .. })
        ));
        assert!(matches!(
            parse(&["fit", "data.csv"], &[(INTERACTIVE_VAR, "maybe")]),
            Err(ConfigErr::InvalidValue { key: INTERACTIVE_VAR, .. })
        ));
    }

    #[test]
    fn usage_errors() {
        assert!(matches!(parse(&[], &[]), Err(ConfigErr::Usage(_))));
        assert!(matches!(parse(&["train"], &[]), Err(ConfigErr::Usage(_))));
        assert!(matches!(parse(&["fit"], &[]), Err(ConfigErr::Usage(_))));
        assert!(matches!(parse(&["generate", "out.csv"], &[]), Err(ConfigErr::Usage(_))));
    }

    #[test]
    fn generate() {
        let cmd = parse(&["generate", "out.csv", "1000", "0.5", "42"], &[]).unwrap();
        assert_eq!(
            cmd,
            Command::Generate(GenerateConfig {
                output: PathBuf::from("out.csv"),
                samples: 1000,
                noise: Noise::Uniform { amplitude: 0.5 },
                seed: Some(42),
            })
        );
    }

    #[test]
    fn noise_forms() {
        assert_eq!(parse_noise("0").unwrap(), Noise::None);
        assert_eq!(parse_noise("1.5").unwrap(), Noise::Uniform { amplitude: 1.5 });
        assert_eq!(parse_noise("uniform:2").unwrap(), Noise::Uniform { amplitude: 2.0 });
        assert_eq!(parse_noise("normal:0.3").unwrap(), Noise::Normal { std_dev: 0.3 });
        assert!(parse_noise("-1").is_err());
        assert!(parse_noise("cauchy:1").is_err());
        assert!(parse_noise("loud").is_err());
    }

    #[test]
    fn zero_samples_are_rejected() {
        assert!(matches!(
            parse(&["generate", "out.csv", "0"], &[]),
            Err(ConfigErr::InvalidValue { key: "samples", .. })
        ));
    }
}
