use std::{
    fs::File,
    io::{self as std_io, BufWriter},
    time::Instant,
};

use anyhow::Context;
use log::{info, warn};
use tokio::{
    io::{self, BufReader},
    signal, task,
};

use linreg::{
    config::{Command, ExecutorKind, FitConfig, GenerateConfig, ReportFormat},
    data::{self, Generator},
    load_csv,
    predict::forward_lines,
    run_prediction_loop, Executor, RayonExecutor, RegressionEngine, Report, Timings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Command::from_env()? {
        Command::Fit(cfg) => fit(cfg).await,
        Command::Generate(cfg) => generate(cfg),
    }
}

async fn fit(cfg: FitConfig) -> anyhow::Result<()> {
    let FitConfig {
        input,
        workers,
        executor,
        format,
        interactive,
    } = cfg;

    let start = Instant::now();
    let store = load_csv(&input).with_context(|| format!("loading {}", input.display()))?;
    info!(samples = store.len(), workers = workers.get(); "loaded {}", input.display());

    let (model, executor_name, regression) = task::spawn_blocking(move || {
        let fit_start = Instant::now();
        let (model, name) = match executor {
            ExecutorKind::Threads => {
                let engine = RegressionEngine::threaded(workers);
                (engine.fit(&store), engine.executor().name())
            }
            ExecutorKind::Rayon => {
                let engine = RegressionEngine::new(RayonExecutor::new(workers)?, workers);
                (engine.fit(&store), engine.executor().name())
            }
        };

        model.map(|model| (model, name, fit_start.elapsed()))
    })
    .await??;

    let timings = Timings {
        regression,
        total: start.elapsed(),
    };

    let report = Report::new(model, workers.get(), executor_name, timings);
    match format {
        ReportFormat::Text => println!("{report}"),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }

    if !interactive {
        return Ok(());
    }

    let stdin = BufReader::new(forward_lines(std_io::BufReader::new(std_io::stdin()))?);
    tokio::select! {
        ret = run_prediction_loop(model.coefficients, stdin, io::stdout()) => {
            let answered = ret?;
            info!(answered = answered; "prediction loop closed");
        }
        _ = signal::ctrl_c() => {
            warn!("received SIGINT, leaving prediction mode");
        }
    }

    Ok(())
}

fn generate(cfg: GenerateConfig) -> anyhow::Result<()> {
    let GenerateConfig {
        output,
        samples,
        noise,
        seed,
    } = cfg;

    let seed = seed.unwrap_or_else(data::random_seed);
    let store = Generator::new(noise, Some(seed)).generate(samples)?;

    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    data::write_csv(&store, BufWriter::new(file))?;

    info!(samples = samples, seed = seed; "wrote {}", output.display());
    println!("{samples} samples written to {}", output.display());

    Ok(())
}
