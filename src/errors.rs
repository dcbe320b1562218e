// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TexwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The model could not be brought up. Fatal before the watch loop starts.
    #[error("Startup failed: {0}")]
    Startup(String),

    /// A single prediction failed. Never fatal for the watch loop.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Clipboard or notification delivery failed. Logged, never fatal.
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TexwatchError>;
