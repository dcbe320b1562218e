use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity tier of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Urgency level handed to the desktop notification daemon.
    ///
    /// Only errors are raised above `Normal`.
    pub fn urgency(self) -> Urgency {
        match self {
            Severity::Info | Severity::Success | Severity::Warning => Urgency::Normal,
            Severity::Error => Urgency::Critical,
        }
    }
}

/// Urgency levels understood by freedesktop notification servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Critical,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        }
    }
}

/// Markup dialect the predictor should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Katex,
    Latex,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Katex
    }
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Katex => "katex",
            OutputFormat::Latex => "latex",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the model process is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorMode {
    /// One long-lived worker process that loads the model once.
    Worker,
    /// One process per image.
    Command,
}

impl Default for PredictorMode {
    fn default() -> Self {
        PredictorMode::Worker
    }
}
