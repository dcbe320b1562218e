// src/predict/protocol.rs

//! Newline-delimited JSON spoken with a predictor worker.
//!
//! ```text
//! worker -> {"status":"ready","device":"cuda"}
//! daemon -> {"op":"predict","images":["/tmp/latexPredict.png"],"out_format":"katex","keep_style":false,"num_beams":1}
//! worker -> {"status":"ok","texts":["E = mc^2"]}
//! daemon -> {"op":"warmup","out_format":"katex","keep_style":false,"num_beams":1}
//! worker -> {"status":"error","message":"CUDA out of memory"}
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::predict::InferenceOptions;
use crate::types::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WorkerRequest<'a> {
    Predict {
        images: &'a [PathBuf],
        out_format: OutputFormat,
        keep_style: bool,
        num_beams: u32,
    },
    Warmup {
        out_format: OutputFormat,
        keep_style: bool,
        num_beams: u32,
    },
}

impl<'a> WorkerRequest<'a> {
    pub fn predict(images: &'a [PathBuf], options: &InferenceOptions) -> Self {
        WorkerRequest::Predict {
            images,
            out_format: options.out_format,
            keep_style: options.keep_style,
            num_beams: options.num_beams,
        }
    }

    pub fn warmup(options: &InferenceOptions) -> Self {
        WorkerRequest::Warmup {
            out_format: options.out_format,
            keep_style: options.keep_style,
            num_beams: options.num_beams,
        }
    }

    /// Serialize as a single JSON line, newline included.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkerResponse {
    Ready {
        #[serde(default)]
        device: Option<String>,
    },
    Ok {
        #[serde(default)]
        texts: Vec<String>,
    },
    Error {
        message: String,
    },
}

impl WorkerResponse {
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// Whether a stdout line is meant for us. Model libraries like to print
/// progress bars and banners; anything not shaped like a JSON object is
/// treated as log output.
pub fn is_protocol_line(line: &str) -> bool {
    line.trim_start().starts_with('{')
}
