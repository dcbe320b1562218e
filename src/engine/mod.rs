// src/engine/mod.rs

//! Watch-dispatch engine.
//!
//! The pure core state machine lives in [`core`]: it decides, event by
//! event, whether the watched file changed in a way that warrants a new
//! prediction. The async/IO shell in [`runtime`] reads events from a
//! channel and awaits the change handler for every dispatch, one at a time.

use std::path::PathBuf;

use crate::watch::FileEvent;

/// Events flowing into the runtime from the watcher and signal handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A filesystem change in the watched directory.
    FileChanged(FileEvent),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Why an event did not lead to a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event path is a directory.
    Directory,
    /// The event concerns some other file.
    OtherPath,
    /// The file vanished before its mtime could be read (replace race).
    Missing,
    /// The mtime could not be read for another reason.
    Unreadable,
    /// Within the debounce window of the last processed change.
    Debounced,
}

/// Outcome of classifying one filesystem event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Dispatch(PathBuf),
    Ignore(IgnoreReason),
}

/// What the IO shell should do after the core handled one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub decision: Option<Decision>,
    pub keep_running: bool,
}

impl CoreStep {
    /// Path to hand to the change handler, if this step dispatches.
    pub fn dispatch_path(&self) -> Option<&PathBuf> {
        match self.decision {
            Some(Decision::Dispatch(ref path)) => Some(path),
            _ => None,
        }
    }
}

pub mod core;
pub mod runtime;

pub use core::CoreRuntime;
pub use runtime::Runtime;
