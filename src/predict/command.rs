// src/predict/command.rs

//! One-shot predictor: runs a command per image and reads the result from
//! stdout. No model stays warm between calls, so this mainly suits wrappers
//! that talk to a model server of their own.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::PredictorConfig;
use crate::errors::{Result, TexwatchError};
use crate::predict::{InferenceOptions, PredictFuture, Predictor};

const IMAGE_PLACEHOLDER: &str = "{image}";

#[derive(Debug, Clone)]
pub struct CommandPredictor {
    program: String,
    args: Vec<String>,
}

impl CommandPredictor {
    /// Check that the program can be found; a missing program is a startup
    /// failure rather than an error on every image.
    pub fn new(cfg: &PredictorConfig) -> Result<Self> {
        if !program_available(&cfg.program) {
            return Err(TexwatchError::Startup(format!(
                "predictor command '{}' not found",
                cfg.program
            )));
        }
        Ok(Self {
            program: cfg.program.clone(),
            args: cfg.args.clone(),
        })
    }

    /// Arguments for one invocation, placeholders filled in.
    ///
    /// Supported: `{image}`, `{format}`, `{num_beams}`, `{keep_style}`. The
    /// image path is appended when no argument mentions `{image}`.
    pub fn build_args(&self, image: &Path, options: &InferenceOptions) -> Vec<String> {
        let image_str = image.to_string_lossy();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                arg.replace(IMAGE_PLACEHOLDER, &image_str)
                    .replace("{format}", options.out_format.as_str())
                    .replace("{num_beams}", &options.num_beams.to_string())
                    .replace("{keep_style}", if options.keep_style { "true" } else { "false" })
            })
            .collect();

        if !self.args.iter().any(|a| a.contains(IMAGE_PLACEHOLDER)) {
            args.push(image_str.into_owned());
        }
        args
    }

    async fn run_one(&self, image: &Path, options: &InferenceOptions) -> Result<String> {
        let args = self.build_args(image, options);
        debug!(program = %self.program, ?args, "running predictor command");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                TexwatchError::Inference(format!("running '{}': {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TexwatchError::Inference(format!(
                "'{}' exited with code {}: {}",
                self.program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Predictor for CommandPredictor {
    fn device(&self) -> &str {
        "external command"
    }

    fn predict<'a>(
        &'a mut self,
        images: &'a [PathBuf],
        options: &'a InferenceOptions,
    ) -> PredictFuture<'a, Vec<String>> {
        Box::pin(async move {
            let mut texts = Vec::with_capacity(images.len());
            for image in images {
                texts.push(self.run_one(image, options).await?);
            }
            Ok(texts)
        })
    }

    fn warm_up<'a>(&'a mut self, _options: &'a InferenceOptions) -> PredictFuture<'a, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Whether `program` is an existing file path or can be found on `PATH`.
pub fn program_available(program: &str) -> bool {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file();
    }

    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}
