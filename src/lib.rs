// src/lib.rs

pub mod cli;
pub mod config;
pub mod deliver;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod pipeline;
pub mod predict;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, ConfigFile};
use crate::deliver::DeliverySink;
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent};
use crate::errors::Result;
use crate::fs::RealFileSystem;
use crate::pipeline::InferencePipeline;
use crate::predict::load_predictor;
use crate::types::Severity;
use crate::watch::{spawn_watcher, Debouncer, WatchTarget};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - delivery sink + predictor (loaded once, kept warm)
/// - file watcher on the target's directory
/// - Ctrl-C handling
/// - the watch-dispatch runtime
///
/// Returns `Ok(())` after a clean shutdown. A predictor that fails to load
/// is returned as `TexwatchError::Startup` before anything is watched and
/// before the watch directory is created.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;

    if args.dry_run {
        let target = WatchTarget::new(&cfg.watch.target)?;
        print_dry_run(&cfg, &target);
        return Ok(());
    }

    let sink = DeliverySink::from_config(&cfg.delivery);
    debug!(?sink, "delivery sink selected");

    let mut predictor = match load_predictor(&cfg.predictor).await {
        Ok(p) => p,
        Err(err) => {
            error!(error = %err, "error loading model");
            sink.notify_titled(
                "TexTeller Daemon",
                &format!("Error loading model: {err}"),
                Severity::Error,
            )
            .await;
            return Err(err);
        }
    };

    if cfg.predictor.warmup {
        info!("warming up model");
        match predictor.warm_up(&cfg.inference).await {
            Ok(()) => info!("model warm-up completed"),
            Err(err) => warn!(error = %err, "model warm-up failed; continuing"),
        }
    }

    let target = WatchTarget::prepare(&cfg.watch.target)?;

    sink.notify_titled(
        "TexTeller Daemon",
        &format!(
            "Model loaded on {}. Monitoring {}",
            predictor.device(),
            target
        ),
        Severity::Info,
    )
    .await;

    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let watcher = spawn_watcher(&target, rt_tx.clone())?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for Ctrl+C: {e}");
                return;
            }
            info!("interrupt received");
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }
    drop(rt_tx);

    info!(target_path = %target, "waiting for changes; press Ctrl+C to stop");

    let core = CoreRuntime::new(
        target,
        Debouncer::new(cfg.watch.debounce),
        Arc::new(RealFileSystem),
    );
    let pipeline = InferencePipeline::new(
        predictor,
        cfg.inference,
        sink,
        cfg.delivery.notify_on_start,
    );

    let result = Runtime::new(core, rt_rx, pipeline).run().await;

    drop(watcher);
    info!("watch subscription released; daemon stopped");
    result
}

/// Load the config named on the command line and apply `--target`.
pub fn resolve_config(args: &CliArgs) -> Result<ConfigFile> {
    let cfg = load_and_validate(&args.config)?;
    Ok(match args.target {
        Some(ref target) => cfg.with_target(target),
        None => cfg,
    })
}

/// Print the resolved configuration without loading the model.
fn print_dry_run(cfg: &ConfigFile, target: &WatchTarget) {
    println!("texwatch dry-run");
    println!("  watch.target = {}", target);
    println!("  watch.dir = {}", target.dir().display());
    println!("  watch.debounce = {:?}", cfg.watch.debounce);
    println!();
    println!("  predictor.mode = {:?}", cfg.predictor.mode);
    println!("  predictor.program = {}", cfg.predictor.program);
    if !cfg.predictor.args.is_empty() {
        println!("  predictor.args = {:?}", cfg.predictor.args);
    }
    println!("  predictor.startup_timeout = {:?}", cfg.predictor.startup_timeout);
    println!("  predictor.warmup = {}", cfg.predictor.warmup);
    println!();
    println!("  inference.out_format = {}", cfg.inference.out_format);
    println!("  inference.keep_style = {}", cfg.inference.keep_style);
    println!("  inference.num_beams = {}", cfg.inference.num_beams);
    println!();
    println!("  delivery.clipboard = {}", cfg.delivery.clipboard);
    if let Some(ref cmd) = cfg.delivery.clipboard_command {
        println!("  delivery.clipboard_command = {:?}", cmd);
    }
    println!("  delivery.notifications = {}", cfg.delivery.notifications);

    debug!("dry-run complete (nothing loaded)");
}
