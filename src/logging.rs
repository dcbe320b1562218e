// src/logging.rs

//! Logging setup for `texwatch` using `tracing` + `tracing-subscriber`.
//!
//! Filter priority:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `TEXWATCH_LOG`, either a bare level ("debug") or full `EnvFilter`
//!    directives ("texwatch=trace,notify=debug")
//! 3. `info`
//!
//! Logs go to STDERR; stdout carries nothing but predictions.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "TEXWATCH_LOG";

/// The notify backends log every raw inotify/FSEvents event at debug.
const QUIET_DEPS: &str = "notify=warn";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(())
}

/// Resolve the filter from the CLI flag and the `TEXWATCH_LOG` value.
///
/// Unparsable env values fall back to `info`.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(lvl) = cli_level {
        return level_filter(level_from_log_level(lvl));
    }

    let Some(env) = env.map(str::trim).filter(|s| !s.is_empty()) else {
        return level_filter(tracing::Level::INFO);
    };

    if let Some(level) = parse_level_str(env) {
        return level_filter(level);
    }

    EnvFilter::try_new(env).unwrap_or_else(|_| level_filter(tracing::Level::INFO))
}

fn level_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::new(format!(
        "{},{QUIET_DEPS}",
        level.as_str().to_ascii_lowercase()
    ))
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

pub fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
