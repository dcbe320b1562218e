// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::predict::InferenceOptions;
use crate::types::{OutputFormat, PredictorMode};

/// Default location of the screenshot the daemon waits for.
pub const DEFAULT_TARGET: &str = "/tmp/latexPredict.png";

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [watch]
/// target = "/tmp/latexPredict.png"
/// debounce = "1s"
///
/// [predictor]
/// mode = "worker"
/// program = "python3"
/// args = ["-u", "texteller_worker.py"]
///
/// [inference]
/// out_format = "katex"
///
/// [delivery]
/// clipboard = true
/// ```
///
/// Only `[predictor].program` is mandatory.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: WatchSection,

    pub predictor: PredictorSection,

    #[serde(default)]
    pub inference: InferenceSection,

    #[serde(default)]
    pub delivery: DeliverySection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// File to watch. Its parent directory is what actually gets subscribed.
    #[serde(default = "default_target")]
    pub target: String,

    /// Minimum mtime distance between two processed changes (e.g. `"1s"`).
    #[serde(default = "default_debounce")]
    pub debounce: String,
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_debounce() -> String {
    "1s".to_string()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            target: default_target(),
            debounce: default_debounce(),
        }
    }
}

/// `[predictor]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorSection {
    #[serde(default)]
    pub mode: PredictorMode,

    /// Executable to spawn (worker process or one-shot command).
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    /// How long a worker may take to report `ready`.
    #[serde(default = "default_startup_timeout")]
    pub startup_timeout: String,

    /// Run one throwaway prediction right after loading.
    #[serde(default)]
    pub warmup: bool,
}

fn default_startup_timeout() -> String {
    "300s".to_string()
}

/// `[inference]` section. Passed through to the predictor untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSection {
    #[serde(default)]
    pub out_format: OutputFormat,

    #[serde(default)]
    pub keep_style: bool,

    #[serde(default = "default_num_beams")]
    pub num_beams: u32,
}

fn default_num_beams() -> u32 {
    1
}

impl Default for InferenceSection {
    fn default() -> Self {
        Self {
            out_format: OutputFormat::default(),
            keep_style: false,
            num_beams: default_num_beams(),
        }
    }
}

/// `[delivery]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliverySection {
    /// Title used for per-image notifications.
    #[serde(default = "default_title")]
    pub title: String,

    /// `--app-name` handed to the notification daemon.
    #[serde(default = "default_title")]
    pub app_name: String,

    #[serde(default = "default_true")]
    pub clipboard: bool,

    #[serde(default = "default_true")]
    pub notifications: bool,

    /// Send an info notification when processing of an image starts.
    #[serde(default = "default_true")]
    pub notify_on_start: bool,

    /// Replaces the platform clipboard commands, e.g.
    /// `["xclip", "-selection", "clipboard"]`.
    #[serde(default)]
    pub clipboard_command: Option<Vec<String>>,
}

fn default_title() -> String {
    "TexTeller".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DeliverySection {
    fn default() -> Self {
        Self {
            title: default_title(),
            app_name: default_title(),
            clipboard: true,
            notifications: true,
            notify_on_start: true,
            clipboard_command: None,
        }
    }
}

/// Validated `[watch]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub target: PathBuf,
    pub debounce: Duration,
}

/// Validated `[predictor]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    pub mode: PredictorMode,
    pub program: String,
    pub args: Vec<String>,
    pub startup_timeout: Duration,
    pub warmup: bool,
}

/// Validated configuration, built once at startup and passed by reference.
///
/// Construct through `ConfigFile::try_from(RawConfigFile)` (see
/// `validate.rs`) or [`crate::config::load_and_validate`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub watch: WatchConfig,
    pub predictor: PredictorConfig,
    pub inference: InferenceOptions,
    pub delivery: DeliverySection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        watch: WatchConfig,
        predictor: PredictorConfig,
        inference: InferenceOptions,
        delivery: DeliverySection,
    ) -> Self {
        Self {
            watch,
            predictor,
            inference,
            delivery,
        }
    }

    /// Replace the watched file, e.g. from `--target`.
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.watch.target = target.into();
        self
    }
}
