// src/watch/debounce.rs

//! Mtime-based debouncing for the watched file.

use std::time::{Duration, SystemTime};

/// Remembers the mtime of the last processed change.
///
/// A change is new only if its mtime lies strictly more than `window` after
/// the recorded one. The very first change is always new.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last: Option<SystemTime>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Mtime of the last admitted change, if any.
    pub fn last(&self) -> Option<SystemTime> {
        self.last
    }

    /// Decide whether a change with this mtime should be processed.
    ///
    /// The stored timestamp is updated before returning `true`, so any event
    /// that arrives while the caller is still busy with this change compares
    /// against the new value.
    pub fn admit(&mut self, mtime: SystemTime) -> bool {
        let fresh = match self.last {
            None => true,
            Some(last) => match last.checked_add(self.window) {
                Some(threshold) => mtime > threshold,
                None => false,
            },
        };

        if fresh {
            self.last = Some(mtime);
        }
        fresh
    }
}
