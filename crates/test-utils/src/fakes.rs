use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use texwatch::deliver::{Clipboard, DeliveryFuture, Notifier};
use texwatch::errors::{Result, TexwatchError};
use texwatch::pipeline::ChangeHandler;
use texwatch::predict::{InferenceOptions, PredictFuture, Predictor};
use texwatch::types::Severity;

/// Scripted reply for one `FakePredictor::predict` call.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Texts(Vec<String>),
    Fail(String),
}

/// A predictor that:
/// - records every image it was asked about
/// - answers from a script, then with `fallback` for each image.
pub struct FakePredictor {
    fallback: String,
    script: VecDeque<FakeReply>,
    calls: Arc<Mutex<Vec<PathBuf>>>,
    options_seen: Arc<Mutex<Vec<InferenceOptions>>>,
    warmups: Arc<AtomicUsize>,
}

impl FakePredictor {
    pub fn new(fallback: &str) -> Self {
        Self {
            fallback: fallback.to_string(),
            script: VecDeque::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            options_seen: Arc::new(Mutex::new(Vec::new())),
            warmups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn then_text(mut self, text: &str) -> Self {
        self.script.push_back(FakeReply::Texts(vec![text.to_string()]));
        self
    }

    pub fn then_texts(mut self, texts: &[&str]) -> Self {
        self.script
            .push_back(FakeReply::Texts(texts.iter().map(|t| t.to_string()).collect()));
        self
    }

    pub fn then_fail(mut self, message: &str) -> Self {
        self.script.push_back(FakeReply::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        Arc::clone(&self.calls)
    }

    pub fn options_seen(&self) -> Arc<Mutex<Vec<InferenceOptions>>> {
        Arc::clone(&self.options_seen)
    }

    pub fn warmups(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.warmups)
    }
}

impl Predictor for FakePredictor {
    fn device(&self) -> &str {
        "fake"
    }

    fn predict<'a>(
        &'a mut self,
        images: &'a [PathBuf],
        options: &'a InferenceOptions,
    ) -> PredictFuture<'a, Vec<String>> {
        Box::pin(async move {
            self.calls.lock().unwrap().extend(images.iter().cloned());
            self.options_seen.lock().unwrap().push(*options);

            match self.script.pop_front() {
                Some(FakeReply::Texts(texts)) => Ok(texts),
                Some(FakeReply::Fail(message)) => Err(TexwatchError::Inference(message)),
                None => Ok(images.iter().map(|_| self.fallback.clone()).collect()),
            }
        })
    }

    fn warm_up<'a>(&'a mut self, _options: &'a InferenceOptions) -> PredictFuture<'a, ()> {
        self.warmups.fetch_add(1, Ordering::SeqCst);
        Box::pin(async { Ok(()) })
    }
}

/// Clipboard that remembers what was copied, or always fails.
#[derive(Clone, Default)]
pub struct RecordingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.lock().unwrap().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn name(&self) -> &str {
        "recording"
    }

    fn set_text<'a>(&'a self, text: &'a str) -> DeliveryFuture<'a> {
        Box::pin(async move {
            if self.fail {
                return Err(TexwatchError::Delivery("clipboard unavailable".to_string()));
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

/// Notifier that remembers every notification.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn severities(&self) -> Vec<Severity> {
        self.sent().into_iter().map(|n| n.severity).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify<'a>(&'a self, title: &'a str, body: &'a str, severity: Severity) -> DeliveryFuture<'a> {
        self.sent.lock().unwrap().push(SentNotification {
            title: title.to_string(),
            body: body.to_string(),
            severity,
        });
        Box::pin(async { Ok(()) })
    }
}

/// Change handler that records paths and fails the first `fail_first`
/// calls.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    seen: Arc<Mutex<Vec<PathBuf>>>,
    fail_first: usize,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_first(n: usize) -> Self {
        Self {
            fail_first: n,
            ..Self::default()
        }
    }

    pub fn seen(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

impl ChangeHandler for RecordingHandler {
    fn on_change<'a>(
        &'a mut self,
        path: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let count = {
                let mut seen = self.seen.lock().unwrap();
                seen.push(path.to_path_buf());
                seen.len()
            };
            if count <= self.fail_first {
                return Err(TexwatchError::Inference(format!("handler failure #{count}")));
            }
            Ok(())
        })
    }
}
