// src/deliver/notification.rs

use tracing::{error, info, warn};

use crate::deliver::process::run_helper;
use crate::deliver::{DeliveryFuture, Notifier};
use crate::types::Severity;

/// freedesktop notifications through `notify-send`.
#[derive(Debug, Clone)]
pub struct NotifySend {
    app_name: String,
}

impl NotifySend {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    pub fn args(&self, title: &str, body: &str, severity: Severity) -> Vec<String> {
        vec![
            format!("--urgency={}", severity.urgency().as_str()),
            format!("--app-name={}", self.app_name),
            title.to_string(),
            body.to_string(),
        ]
    }
}

impl Notifier for NotifySend {
    fn notify<'a>(&'a self, title: &'a str, body: &'a str, severity: Severity) -> DeliveryFuture<'a> {
        Box::pin(async move {
            run_helper("notify-send", &self.args(title, body, severity), None).await
        })
    }
}

/// macOS Notification Center through `osascript`. Has no urgency levels.
#[derive(Debug, Clone, Default)]
pub struct Osascript;

impl Osascript {
    pub fn script(title: &str, body: &str) -> String {
        format!(
            "display notification {} with title {}",
            applescript_string(body),
            applescript_string(title)
        )
    }
}

fn applescript_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Notifier for Osascript {
    fn notify<'a>(&'a self, title: &'a str, body: &'a str, _severity: Severity) -> DeliveryFuture<'a> {
        Box::pin(async move {
            let args = vec!["-e".to_string(), Self::script(title, body)];
            run_helper("osascript", &args, None).await
        })
    }
}

/// Fallback when desktop notifications are off or unsupported: the message
/// only goes to the log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify<'a>(&'a self, title: &'a str, body: &'a str, severity: Severity) -> DeliveryFuture<'a> {
        match severity {
            Severity::Info | Severity::Success => info!(title, "{body}"),
            Severity::Warning => warn!(title, "{body}"),
            Severity::Error => error!(title, "{body}"),
        }
        Box::pin(async { Ok(()) })
    }
}
