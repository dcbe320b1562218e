// src/pipeline/inference.rs

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::deliver::{CopyOutcome, DeliverySink};
use crate::errors::{Result, TexwatchError};
use crate::pipeline::ChangeHandler;
use crate::predict::{InferenceOptions, Predictor};
use crate::types::Severity;

/// Predict LaTeX for the changed image and deliver it.
///
/// Prediction errors are reported to the user and swallowed: `on_change`
/// always returns `Ok`, so one bad screenshot never stops the daemon.
pub struct InferencePipeline {
    predictor: Box<dyn Predictor>,
    options: InferenceOptions,
    sink: DeliverySink,
    notify_on_start: bool,
}

impl std::fmt::Debug for InferencePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferencePipeline")
            .field("device", &self.predictor.device())
            .field("options", &self.options)
            .field("sink", &self.sink)
            .finish()
    }
}

impl InferencePipeline {
    pub fn new(
        predictor: Box<dyn Predictor>,
        options: InferenceOptions,
        sink: DeliverySink,
        notify_on_start: bool,
    ) -> Self {
        Self {
            predictor,
            options,
            sink,
            notify_on_start,
        }
    }

    async fn process(&mut self, path: &Path) {
        info!(?path, "processing image");

        if self.notify_on_start {
            self.sink
                .notify("Processing LaTeX prediction...", Severity::Info)
                .await;
        }

        let started = Instant::now();
        let result = self.predict_one(path).await;
        let elapsed = started.elapsed();

        match result {
            Ok(latex) => Self::deliver(&self.sink, &latex, elapsed).await,
            Err(err) => {
                error!(?path, error = %err, "error processing image");
                self.sink
                    .notify(&format!("Error processing image: {err}"), Severity::Error)
                    .await;
            }
        }
    }

    async fn predict_one(&mut self, path: &Path) -> Result<String> {
        let images = [path.to_path_buf()];
        let mut texts = self.predictor.predict(&images, &self.options).await?;
        match texts.len() {
            1 => Ok(texts.remove(0)),
            n => Err(TexwatchError::Inference(format!(
                "expected one prediction for one image, got {n}"
            ))),
        }
    }

    async fn deliver(sink: &DeliverySink, latex: &str, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        info!(latex = %latex, elapsed_ms = elapsed.as_millis() as u64, "prediction complete");

        // The prediction itself goes to stdout; logs live on stderr.
        println!("{latex}");

        let (body, severity) = match sink.copy(latex).await {
            CopyOutcome::Copied => (
                format!("LaTeX prediction completed in {secs:.2}s and copied to clipboard!"),
                Severity::Success,
            ),
            CopyOutcome::Disabled => (
                format!("LaTeX prediction completed in {secs:.2}s"),
                Severity::Success,
            ),
            CopyOutcome::Failed => (
                format!(
                    "LaTeX prediction completed in {secs:.2}s, but copying to the clipboard failed"
                ),
                Severity::Warning,
            ),
        };
        sink.notify(&body, severity).await;
    }
}

impl ChangeHandler for InferencePipeline {
    fn on_change<'a>(
        &'a mut self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.process(path).await;
            Ok(())
        })
    }
}
