// src/watch/watcher.rs

use std::fs;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::watch::{FileEvent, WatchTarget};

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive. Dropping this handle
/// releases the subscription, which also ends the forwarding task.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Subscribe to the parent directory of `target` (non-recursively) and
/// forward every relevant change as `RuntimeEvent::FileChanged`.
///
/// The directory rather than the file is watched because the file is
/// usually replaced, not edited in place, and may not exist yet. Filtering
/// down to the target path happens in the core, not here.
pub fn spawn_watcher(
    target: &WatchTarget,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let dir = target.dir().to_path_buf();
    if !dir.exists() {
        info!(?dir, "watch directory does not exist; creating it");
        fs::create_dir_all(&dir)?;
    }

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    debug!("dropping notify event after shutdown: {err}");
                }
            }
            Err(err) => {
                warn!("file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    info!(dir = ?dir, target_path = %target, "file watcher started");

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            for change in FileEvent::from_notify(&event) {
                if runtime_tx.send(RuntimeEvent::FileChanged(change)).await.is_err() {
                    debug!("runtime channel closed; stopping watcher forwarding");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
