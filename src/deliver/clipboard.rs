// src/deliver/clipboard.rs

use tracing::debug;

use crate::deliver::process::run_helper;
use crate::deliver::{Clipboard, DeliveryFuture, Platform};
use crate::errors::TexwatchError;

/// A program that reads the text to copy from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build from an argv list such as `["xclip", "-selection", "clipboard"]`.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

/// Copies through the first candidate command that succeeds.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<ClipboardCommand>,
}

impl CommandClipboard {
    pub fn new(candidates: Vec<ClipboardCommand>) -> Self {
        Self { candidates }
    }

    /// Platform default candidates, in order of preference.
    ///
    /// `None` when the platform has no known clipboard helper.
    pub fn for_platform(platform: Platform, wayland: bool) -> Option<Self> {
        let candidates = match platform {
            Platform::Linux => {
                let mut c = Vec::new();
                if wayland {
                    c.push(ClipboardCommand::new("wl-copy", &[]));
                }
                c.push(ClipboardCommand::new("xclip", &["-selection", "clipboard"]));
                c.push(ClipboardCommand::new("xsel", &["--clipboard", "--input"]));
                c
            }
            Platform::MacOs => vec![ClipboardCommand::new("pbcopy", &[])],
            Platform::Windows => vec![ClipboardCommand::new("clip", &[])],
            Platform::Other => return None,
        };
        Some(Self::new(candidates))
    }

    pub fn candidates(&self) -> &[ClipboardCommand] {
        &self.candidates
    }
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        self.candidates
            .first()
            .map(|c| c.program.as_str())
            .unwrap_or("none")
    }

    fn set_text<'a>(&'a self, text: &'a str) -> DeliveryFuture<'a> {
        Box::pin(async move {
            let mut failures = Vec::new();
            for candidate in &self.candidates {
                match run_helper(&candidate.program, &candidate.args, Some(text)).await {
                    Ok(()) => {
                        debug!(program = %candidate.program, "copied prediction to clipboard");
                        return Ok(());
                    }
                    Err(err) => {
                        debug!(program = %candidate.program, error = %err, "clipboard helper failed");
                        failures.push(err.to_string());
                    }
                }
            }
            Err(TexwatchError::Delivery(format!(
                "no clipboard helper succeeded ({})",
                failures.join("; ")
            )))
        })
    }
}
