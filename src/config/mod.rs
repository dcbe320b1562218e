// src/config/mod.rs

//! Configuration loading and validation for texwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Turn the raw model into a validated [`ConfigFile`] (`validate.rs`).

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::parse_duration;
pub use loader::{default_config_path, load_and_validate, load_from_path, parse_and_validate};
pub use model::{
    ConfigFile, DeliverySection, InferenceSection, PredictorConfig, PredictorSection,
    RawConfigFile, WatchConfig, WatchSection, DEFAULT_TARGET,
};
