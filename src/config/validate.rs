// src/config/validate.rs

use std::path::PathBuf;

use crate::config::duration::parse_duration;
use crate::config::model::{
    ConfigFile, DeliverySection, PredictorConfig, PredictorSection, RawConfigFile,
    WatchConfig, WatchSection,
};
use crate::errors::{Result, TexwatchError};
use crate::predict::InferenceOptions;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TexwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let watch = validate_watch(&raw.watch)?;
        let predictor = validate_predictor(&raw.predictor)?;

        if raw.inference.num_beams == 0 {
            return Err(TexwatchError::ConfigError(
                "[inference].num_beams must be >= 1 (got 0)".to_string(),
            ));
        }
        let inference = InferenceOptions {
            out_format: raw.inference.out_format,
            keep_style: raw.inference.keep_style,
            num_beams: raw.inference.num_beams,
        };

        validate_delivery(&raw.delivery)?;

        Ok(ConfigFile::new_unchecked(
            watch,
            predictor,
            inference,
            raw.delivery,
        ))
    }
}

fn validate_watch(section: &WatchSection) -> Result<WatchConfig> {
    let target = section.target.trim();
    if target.is_empty() {
        return Err(TexwatchError::ConfigError(
            "[watch].target must not be empty".to_string(),
        ));
    }

    let target = PathBuf::from(target);
    if target.file_name().is_none() {
        return Err(TexwatchError::ConfigError(format!(
            "[watch].target must name a file, got {:?}",
            target
        )));
    }

    let debounce = parse_duration(&section.debounce)
        .map_err(|e| TexwatchError::ConfigError(format!("[watch].debounce: {e}")))?;
    if debounce.is_zero() {
        return Err(TexwatchError::ConfigError(
            "[watch].debounce must be greater than zero".to_string(),
        ));
    }

    Ok(WatchConfig { target, debounce })
}

fn validate_predictor(section: &PredictorSection) -> Result<PredictorConfig> {
    let program = section.program.trim();
    if program.is_empty() {
        return Err(TexwatchError::ConfigError(
            "[predictor].program must not be empty".to_string(),
        ));
    }

    let startup_timeout = parse_duration(&section.startup_timeout).map_err(|e| {
        TexwatchError::ConfigError(format!("[predictor].startup_timeout: {e}"))
    })?;

    Ok(PredictorConfig {
        mode: section.mode,
        program: program.to_string(),
        args: section.args.clone(),
        startup_timeout,
        warmup: section.warmup,
    })
}

fn validate_delivery(section: &DeliverySection) -> Result<()> {
    if let Some(ref command) = section.clipboard_command {
        match command.first() {
            Some(program) if !program.trim().is_empty() => {}
            _ => {
                return Err(TexwatchError::ConfigError(
                    "[delivery].clipboard_command needs at least a program name".to_string(),
                ));
            }
        }
    }
    Ok(())
}
