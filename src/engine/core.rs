// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! `CoreRuntime` consumes [`RuntimeEvent`]s and answers with a [`CoreStep`].
//! It owns the watch target and the debounce state, reads mtimes through the
//! [`FileSystem`] trait and has no channels or Tokio types, so it can be
//! tested against [`crate::fs::mock::MockFileSystem`] with fabricated mtimes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine::{CoreStep, Decision, IgnoreReason, RuntimeEvent};
use crate::fs::FileSystem;
use crate::watch::{Debouncer, FileEvent, WatchTarget};

#[derive(Debug)]
pub struct CoreRuntime {
    target: WatchTarget,
    debouncer: Debouncer,
    fs: Arc<dyn FileSystem>,
}

impl CoreRuntime {
    pub fn new(target: WatchTarget, debouncer: Debouncer, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            target,
            debouncer,
            fs,
        }
    }

    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    /// Handle a single runtime event.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        match event {
            RuntimeEvent::FileChanged(event) => CoreStep {
                decision: Some(self.classify(&event)),
                keep_running: true,
            },
            RuntimeEvent::ShutdownRequested => CoreStep {
                decision: None,
                keep_running: false,
            },
        }
    }

    /// Decide whether `event` is a new, distinct change of the target.
    ///
    /// On `Decision::Dispatch` the debounce timestamp has already been
    /// updated.
    pub fn classify(&mut self, event: &FileEvent) -> Decision {
        if !self.target.matches(event.path()) {
            return Decision::Ignore(IgnoreReason::OtherPath);
        }

        // Matched: from here on look at the file through its normalized path.
        let path = self.target.path();

        if self.fs.is_dir(path) {
            debug!(?path, "directory event at target path; ignoring");
            return Decision::Ignore(IgnoreReason::Directory);
        }

        let mtime = match self.fs.modified(path) {
            Ok(Some(mtime)) => mtime,
            Ok(None) => {
                debug!(?path, kind = event.kind_str(), "target missing at mtime check; skipping");
                return Decision::Ignore(IgnoreReason::Missing);
            }
            Err(err) => {
                warn!(?path, error = %err, "could not read target mtime; skipping");
                return Decision::Ignore(IgnoreReason::Unreadable);
            }
        };

        if !self.debouncer.admit(mtime) {
            debug!(
                ?path,
                kind = event.kind_str(),
                window_ms = self.debouncer.window().as_millis() as u64,
                "change within debounce window; ignoring"
            );
            return Decision::Ignore(IgnoreReason::Debounced);
        }

        debug!(?path, kind = event.kind_str(), "target changed -> dispatch");
        Decision::Dispatch(path.to_path_buf())
    }
}
