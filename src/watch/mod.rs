// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Describing the single watched file ([`WatchTarget`]).
//! - Translating `notify` events into [`FileEvent`]s.
//! - Mtime-based debouncing ([`Debouncer`]).
//! - Wiring up the cross-platform watcher on the target's directory.
//!
//! It does **not** know about predictions; it only turns filesystem changes
//! into runtime events.

pub mod debounce;
pub mod event;
pub mod path_utils;
pub mod target;
pub mod watcher;

pub use debounce::Debouncer;
pub use event::FileEvent;
pub use target::WatchTarget;
pub use watcher::{spawn_watcher, WatcherHandle};
