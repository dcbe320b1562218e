// src/predict/mod.rs

//! Image-to-LaTeX prediction.
//!
//! The model itself lives outside this process. Everything here talks to it
//! through the [`Predictor`] trait:
//!
//! - [`worker`] keeps one long-lived process around that loads the model
//!   once and answers newline-delimited JSON requests ([`protocol`]).
//! - [`command`] runs a one-shot command per image.
//!
//! Tests substitute their own `Predictor` implementation.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Instant;

use tracing::info;

use crate::config::PredictorConfig;
use crate::errors::Result;
use crate::types::{OutputFormat, PredictorMode};

pub mod command;
pub mod protocol;
pub mod worker;

pub use command::CommandPredictor;
pub use worker::WorkerPredictor;

/// Options passed through to the model on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceOptions {
    pub out_format: OutputFormat,
    pub keep_style: bool,
    pub num_beams: u32,
}

impl Default for InferenceOptions {
    /// Greedy single-beam decoding to KaTeX, without style preservation.
    fn default() -> Self {
        Self {
            out_format: OutputFormat::Katex,
            keep_style: false,
            num_beams: 1,
        }
    }
}

/// Boxed future returned by [`Predictor`] methods.
pub type PredictFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// A loaded, warm model.
pub trait Predictor: Send {
    /// Human-readable description of where the model runs (e.g. `"cuda"`).
    fn device(&self) -> &str;

    /// Predict one text per image, in order.
    fn predict<'a>(
        &'a mut self,
        images: &'a [PathBuf],
        options: &'a InferenceOptions,
    ) -> PredictFuture<'a, Vec<String>>;

    /// Run a throwaway prediction so the first real one is fast.
    fn warm_up<'a>(&'a mut self, options: &'a InferenceOptions) -> PredictFuture<'a, ()>;
}

/// Bring up the configured predictor.
///
/// Any error here is a startup failure; the daemon must not enter the watch
/// loop without a model.
pub async fn load_predictor(cfg: &PredictorConfig) -> Result<Box<dyn Predictor>> {
    info!(mode = ?cfg.mode, program = %cfg.program, "loading predictor");
    let started = Instant::now();

    let predictor: Box<dyn Predictor> = match cfg.mode {
        PredictorMode::Worker => Box::new(WorkerPredictor::spawn(cfg).await?),
        PredictorMode::Command => Box::new(CommandPredictor::new(cfg)?),
    };

    info!(
        device = predictor.device(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "predictor ready"
    );
    Ok(predictor)
}
