// src/deliver/mod.rs

//! Delivery of predictions to the desktop.
//!
//! Two independent, best-effort effects: copying text to the clipboard and
//! showing a notification. Both sit behind a small trait with per-platform
//! implementations chosen once at startup ([`DeliverySink::from_config`]).
//! Nothing in here is ever fatal; failures are logged as warnings.

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info, warn};

use crate::config::DeliverySection;
use crate::errors::Result;
use crate::types::Severity;

pub mod clipboard;
pub mod notification;
pub mod process;

pub use clipboard::{ClipboardCommand, CommandClipboard};
pub use notification::{LogNotifier, NotifySend, Osascript};

/// Boxed future returned by delivery capabilities.
pub type DeliveryFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

pub trait Clipboard: Send + Sync {
    /// Short label for logs (e.g. the helper program).
    fn name(&self) -> &str;
    fn set_text<'a>(&'a self, text: &'a str) -> DeliveryFuture<'a>;
}

pub trait Notifier: Send + Sync {
    fn notify<'a>(&'a self, title: &'a str, body: &'a str, severity: Severity) -> DeliveryFuture<'a>;
}

/// Operating system family, used only to pick delivery helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )) {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

/// Result of a clipboard copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Clipboard delivery is turned off or unsupported here.
    Disabled,
    Failed,
}

/// Clipboard + notifier pair used by the inference pipeline.
pub struct DeliverySink {
    clipboard: Option<Box<dyn Clipboard>>,
    notifier: Box<dyn Notifier>,
    title: String,
}

impl std::fmt::Debug for DeliverySink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliverySink")
            .field("clipboard", &self.clipboard.as_ref().map(|c| c.name().to_string()))
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl DeliverySink {
    pub fn new(
        clipboard: Option<Box<dyn Clipboard>>,
        notifier: Box<dyn Notifier>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            clipboard,
            notifier,
            title: title.into(),
        }
    }

    /// Pick clipboard and notifier implementations for this platform.
    pub fn from_config(cfg: &DeliverySection) -> Self {
        Self::for_platform(cfg, Platform::current())
    }

    pub fn for_platform(cfg: &DeliverySection, platform: Platform) -> Self {
        let clipboard: Option<Box<dyn Clipboard>> = if !cfg.clipboard {
            None
        } else if let Some(cmd) = cfg.clipboard_command.as_deref().and_then(ClipboardCommand::from_argv) {
            Some(Box::new(CommandClipboard::new(vec![cmd])))
        } else {
            let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
            match CommandClipboard::for_platform(platform, wayland) {
                Some(c) => Some(Box::new(c)),
                None => {
                    warn!(?platform, "no clipboard helper known for this platform; clipboard delivery disabled");
                    None
                }
            }
        };

        let notifier: Box<dyn Notifier> = if !cfg.notifications {
            Box::new(LogNotifier)
        } else {
            match platform {
                Platform::Linux => Box::new(NotifySend::new(cfg.app_name.clone())),
                Platform::MacOs => Box::new(Osascript),
                Platform::Windows | Platform::Other => {
                    info!(?platform, "desktop notifications unsupported here; logging them instead");
                    Box::new(LogNotifier)
                }
            }
        };

        Self::new(clipboard, notifier, cfg.title.clone())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Copy `text` to the clipboard. Failures are logged, never returned.
    pub async fn copy(&self, text: &str) -> CopyOutcome {
        let Some(clipboard) = self.clipboard.as_ref() else {
            debug!("clipboard delivery disabled; skipping copy");
            return CopyOutcome::Disabled;
        };
        match clipboard.set_text(text).await {
            Ok(()) => CopyOutcome::Copied,
            Err(err) => {
                warn!(clipboard = clipboard.name(), error = %err, "could not copy to clipboard");
                CopyOutcome::Failed
            }
        }
    }

    /// Notify under the sink's default title.
    pub async fn notify(&self, body: &str, severity: Severity) {
        self.notify_titled(&self.title, body, severity).await;
    }

    /// Notify under an explicit title. Failures are logged, never returned.
    pub async fn notify_titled(&self, title: &str, body: &str, severity: Severity) {
        if let Err(err) = self.notifier.notify(title, body, severity).await {
            warn!(error = %err, "could not send desktop notification");
        }
    }
}
