use std::{
    io::{self, BufRead},
    thread,
};

use log::debug;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, DuplexStream},
    runtime::Handle,
};

use crate::regression::Coefficients;

const PROMPT: &[u8] = b"x = ";
const QUIT: [&str; 4] = ["q", "quit", "exit", "sair"];
const FORWARD_BUFFER: usize = 4096;

/// Forwards the lines of a blocking reader into an async stream.
///
/// Reading happens on a detached OS thread, so a read that never returns
/// (an idle terminal) doesn't keep the runtime from shutting down. The
/// stream ends when `source` is exhausted or fails.
///
/// # Arguments
/// * `source` - The blocking line source, usually stdin.
///
/// # Returns
/// The read half of the stream, or an io error if the thread couldn't be spawned.
///
/// # Panics
/// If called outside of a tokio runtime.
pub fn forward_lines<R>(source: R) -> io::Result<DuplexStream>
where
    R: BufRead + Send + 'static,
{
    let handle = Handle::current();
    let (mut tx, rx) = tokio::io::duplex(FORWARD_BUFFER);

    thread::Builder::new()
        .name("linreg-stdin".to_string())
        .spawn(move || {
            for line in source.lines() {
                let Ok(line) = line else {
                    break;
                };

                let sent = handle.block_on(async {
                    tx.write_all(line.as_bytes()).await?;
                    tx.write_all(b"\n").await
                });

                if sent.is_err() {
                    break;
                }
            }
        })?;

    Ok(rx)
}

/// Reads x values and answers the predicted y for each one.
///
/// Every whitespace separated token is handled on its own. The loop ends on
/// a quit word (`q`, `quit`, `exit`, `sair`) or when the input is exhausted.
///
/// # Arguments
/// * `coefficients` - The fitted line.
/// * `reader` - Where x values are read from.
/// * `writer` - Where prompts and predictions are written to.
///
/// # Returns
/// The amount of predictions answered, or the first io error.
pub async fn run_prediction_loop<R, W>(
    coefficients: Coefficients,
    reader: R,
    mut writer: W,
) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(b"\n=== PREDICTION ===\nType an x value to predict y ('q' to quit)\n")
        .await?;

    let mut lines = reader.lines();
    let mut answered = 0;

    'outer: loop {
        writer.write_all(PROMPT).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        for token in line.split_whitespace() {
            if QUIT.contains(&token) {
                break 'outer;
            }

            let reply = match token.parse::<f64>() {
                Ok(x) if x.is_finite() => {
                    answered += 1;
                    format!("-> y = {:.6}\n", coefficients.predict(x))
                }
                _ => format!("invalid input '{token}', type a number or 'q' to quit\n"),
            };

            writer.write_all(reply.as_bytes()).await?;
        }
    }

    debug!(answered = answered; "prediction loop finished");
    writer.write_all(b"leaving prediction mode\n").await?;
    writer.flush().await?;

    Ok(answered)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use tokio::io::BufReader;

    use super::*;

    async fn run(input: &str) -> (usize, String) {
        let mut out = Vec::new();
        let answered = run_prediction_loop(Coefficients::new(2.0, 3.5), input.as_bytes(), &mut out)
            .await
            .unwrap();

        (answered, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn answers_predictions() {
        let (answered, out) = run("0\n2\nq\n").await;

        assert_eq!(answered, 2);
        assert!(out.contains("-> y = 2.000000\n"));
        assert!(out.contains("-> y = 9.000000\n"));
        assert!(out.ends_with("leaving prediction mode\n"));
    }

    #[tokio::test]
    async fn rejects_garbage() {
        let (answered, out) = run("abc\nNaN\n1\n").await;

        assert_eq!(answered, 1);
        assert!(out.contains("invalid input 'abc'"));
        assert!(out.contains("invalid input 'NaN'"));
        assert!(out.contains("-> y = 5.500000\n"));
    }

    #[tokio::test]
    async fn stops_on_quit_word() {
        let (answered, out) = run("1 sair 2\n3\n").await;

        assert_eq!(answered, 1);
        assert!(!out.contains("-> y = 9.000000"));
    }

    #[tokio::test]
    async fn exit_is_a_quit_word() {
        let (answered, out) = run("exit\n1\n").await;

        assert_eq!(answered, 0);
        assert!(!out.contains("-> y ="));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn forwarded_lines_feed_the_loop() {
        let rx = forward_lines("0\n2\n".as_bytes()).unwrap();
        let mut out = Vec::new();

        let answered = run_prediction_loop(Coefficients::new(2.0, 3.5), BufReader::new(rx), &mut out)
            .await
            .unwrap();

        assert_eq!(answered, 2);
        assert!(String::from_utf8(out).unwrap().contains("-> y = 9.000000\n"));
    }

    struct Stalled;

    impl io::Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            thread::sleep(Duration::from_secs(600));
            Ok(0)
        }
    }

    #[test]
    fn stalled_source_does_not_block_shutdown() {
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let start = Instant::now();
        runtime.block_on(async {
            let rx = forward_lines(io::BufReader::new(Stalled)).unwrap();
            let loop_ = run_prediction_loop(Coefficients::new(0.0, 1.0), BufReader::new(rx), tokio::io::sink());

            tokio::select! {
                _ = loop_ => panic!("the stalled source produced input"),
                _ = tokio::time::sleep(Duration::from_millis(50)) => {}
            }
        });
        drop(runtime);

        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn stops_at_end_of_input() {
        let (answered, out) = run("").await;

        assert_eq!(answered, 0);
        assert!(out.contains("x = "));
    }
}
