// src/predict/worker.rs

//! Long-lived predictor process.
//!
//! The worker loads the model once, reports `ready`, and then answers one
//! request per line for as long as the daemon runs. Requests are strictly
//! sequential: the runtime never has two predictions in flight.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, info};

use crate::config::PredictorConfig;
use crate::errors::{Result, TexwatchError};
use crate::predict::protocol::{is_protocol_line, WorkerRequest, WorkerResponse};
use crate::predict::{InferenceOptions, PredictFuture, Predictor};

pub struct WorkerPredictor {
    // Held for `kill_on_drop`: the worker dies with the predictor.
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    device: String,
}

impl std::fmt::Debug for WorkerPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPredictor")
            .field("pid", &self.child.id())
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl WorkerPredictor {
    /// Spawn the worker and wait (up to `startup_timeout`) for its `ready`
    /// line. Every failure is a `TexwatchError::Startup`.
    pub async fn spawn(cfg: &PredictorConfig) -> Result<Self> {
        let mut cmd = Command::new(&cfg.program);
        cmd.args(&cfg.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            TexwatchError::Startup(format!(
                "spawning predictor worker '{}': {e}",
                cfg.program
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| TexwatchError::Startup("worker stdin was not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TexwatchError::Startup("worker stdout was not captured".to_string()))?;

        // Drain stderr to EOF regardless of encoding; the worker must never
        // write into a closed pipe.
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut reader = BufReader::new(stderr);
                let mut buf = Vec::new();
                loop {
                    match read_line_lossy(&mut reader, &mut buf).await {
                        Ok(Some(line)) => debug!("worker stderr: {}", line),
                        Ok(None) => break,
                        Err(err) => {
                            debug!(error = %err, "reading worker stderr failed; stopping drain");
                            break;
                        }
                    }
                }
            });
        }

        info!(pid = ?child.id(), program = %cfg.program, "predictor worker spawned; waiting for model");

        let mut stdout = BufReader::new(stdout);
        let handshake = timeout(cfg.startup_timeout, next_message(&mut stdout))
            .await
            .map_err(|_| {
                TexwatchError::Startup(format!(
                    "predictor worker did not report ready within {:?}",
                    cfg.startup_timeout
                ))
            })?;

        let device = match handshake {
            Ok(Some(WorkerResponse::Ready { device })) => {
                device.unwrap_or_else(|| "unknown device".to_string())
            }
            Ok(Some(WorkerResponse::Error { message })) => {
                return Err(TexwatchError::Startup(format!(
                    "predictor worker failed to load the model: {message}"
                )));
            }
            Ok(Some(other)) => {
                return Err(TexwatchError::Startup(format!(
                    "expected ready message from predictor worker, got {other:?}"
                )));
            }
            Ok(None) => {
                return Err(TexwatchError::Startup(
                    "predictor worker exited before reporting ready".to_string(),
                ));
            }
            Err(err) => {
                return Err(TexwatchError::Startup(format!(
                    "reading predictor worker handshake: {err}"
                )));
            }
        };

        Ok(Self {
            child,
            stdin,
            stdout,
            device,
        })
    }

    async fn round_trip(&mut self, request: &WorkerRequest<'_>) -> Result<WorkerResponse> {
        let line = request.to_line()?;

        self.stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| TexwatchError::Inference(format!("writing to predictor worker: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| TexwatchError::Inference(format!("flushing predictor worker stdin: {e}")))?;

        match next_message(&mut self.stdout).await {
            Ok(Some(response)) => Ok(response),
            Ok(None) => Err(TexwatchError::Inference(
                "predictor worker exited".to_string(),
            )),
            Err(err) => Err(TexwatchError::Inference(format!(
                "reading predictor worker reply: {err}"
            ))),
        }
    }
}

/// Read stdout until the next valid protocol message, logging anything
/// else, including JSON-looking lines that are not responses. The reply to
/// the current request is always the one consumed.
///
/// `Ok(None)` on EOF.
async fn next_message(stdout: &mut BufReader<ChildStdout>) -> Result<Option<WorkerResponse>> {
    let mut buf = Vec::new();
    while let Some(line) = read_line_lossy(stdout, &mut buf).await? {
        if !is_protocol_line(&line) {
            debug!("worker stdout: {}", line);
            continue;
        }
        match WorkerResponse::parse(&line) {
            Ok(response) => return Ok(Some(response)),
            Err(err) => debug!(error = %err, "worker stdout (not a response): {}", line),
        }
    }
    Ok(None)
}

/// Next line without its terminator, invalid UTF-8 replaced. `Ok(None)` on
/// EOF.
async fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

impl Predictor for WorkerPredictor {
    fn device(&self) -> &str {
        &self.device
    }

    fn predict<'a>(
        &'a mut self,
        images: &'a [PathBuf],
        options: &'a InferenceOptions,
    ) -> PredictFuture<'a, Vec<String>> {
        Box::pin(async move {
            let request = WorkerRequest::predict(images, options);
            match self.round_trip(&request).await? {
                WorkerResponse::Ok { texts } if texts.len() == images.len() => Ok(texts),
                WorkerResponse::Ok { texts } => Err(TexwatchError::Inference(format!(
                    "predictor worker returned {} result(s) for {} image(s)",
                    texts.len(),
                    images.len()
                ))),
                WorkerResponse::Error { message } => Err(TexwatchError::Inference(message)),
                WorkerResponse::Ready { .. } => Err(TexwatchError::Inference(
                    "unexpected ready message from predictor worker".to_string(),
                )),
            }
        })
    }

    fn warm_up<'a>(&'a mut self, options: &'a InferenceOptions) -> PredictFuture<'a, ()> {
        Box::pin(async move {
            match self.round_trip(&WorkerRequest::warmup(options)).await? {
                WorkerResponse::Ok { .. } => Ok(()),
                WorkerResponse::Error { message } => Err(TexwatchError::Inference(message)),
                WorkerResponse::Ready { .. } => Err(TexwatchError::Inference(
                    "unexpected ready message from predictor worker".to_string(),
                )),
            }
        })
    }
}
