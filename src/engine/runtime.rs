// src/engine/runtime.rs

use std::fmt;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::pipeline::ChangeHandler;

use super::core::CoreRuntime;
use super::RuntimeEvent;

/// Drives the core in response to `RuntimeEvent`s and hands every dispatched
/// change to a `ChangeHandler`.
///
/// The handler is awaited before the next event is read, so at most one
/// prediction is ever in flight. Events arriving meanwhile wait in the
/// channel and are then checked against the already-updated debounce state.
pub struct Runtime<H: ChangeHandler> {
    core: CoreRuntime,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    handler: H,
    dispatched: u64,
}

impl<H: ChangeHandler> fmt::Debug for Runtime<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("dispatched", &self.dispatched)
            .finish_non_exhaustive()
    }
}

impl<H: ChangeHandler> Runtime<H> {
    pub fn new(core: CoreRuntime, event_rx: mpsc::Receiver<RuntimeEvent>, handler: H) -> Self {
        Self {
            core,
            event_rx,
            handler,
            dispatched: 0,
        }
    }

    /// Main event loop.
    ///
    /// Returns once `ShutdownRequested` is received or every sender is gone.
    /// A handler error is logged and the loop keeps going.
    pub async fn run(mut self) -> Result<()> {
        info!(target_path = %self.core.target(), "texwatch runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            let step = self.core.step(event);

            if let Some(path) = step.dispatch_path() {
                let path = path.clone();
                self.dispatch(path).await;
            }

            if !step.keep_running {
                info!("shutdown requested; stopping runtime");
                break;
            }
        }

        info!(dispatched = self.dispatched, "runtime exiting");
        Ok(())
    }

    async fn dispatch(&mut self, path: PathBuf) {
        self.dispatched += 1;
        if let Err(err) = self.handler.on_change(&path).await {
            error!(
                path = ?path,
                error = %err,
                "change handler failed; still watching"
            );
        }
    }
}
