// src/watch/event.rs

use std::path::{Path, PathBuf};

use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::EventKind;

/// A filesystem change that may concern the watched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Created(PathBuf),
    Modified(PathBuf),
    /// A rename into `to`. `from` is known only when the backend reports
    /// both halves of the rename together.
    Moved { from: Option<PathBuf>, to: PathBuf },
}

impl FileEvent {
    /// Path the event is about: the destination for moves, the event's own
    /// path otherwise.
    pub fn path(&self) -> &Path {
        match self {
            FileEvent::Created(path) | FileEvent::Modified(path) => path,
            FileEvent::Moved { to, .. } => to,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            FileEvent::Created(_) => "created",
            FileEvent::Modified(_) => "modified",
            FileEvent::Moved { .. } => "moved",
        }
    }

    /// Translate a raw `notify` event into zero or more `FileEvent`s.
    ///
    /// Folder creation, removals, accesses and renames *away* from a path are
    /// dropped; none of them can produce a new image at the target.
    pub fn from_notify(event: &notify::Event) -> Vec<FileEvent> {
        match event.kind {
            EventKind::Create(CreateKind::Folder) => Vec::new(),
            EventKind::Create(_) => event
                .paths
                .iter()
                .cloned()
                .map(FileEvent::Created)
                .collect(),
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                match event.paths.as_slice() {
                    [from, to] => vec![FileEvent::Moved {
                        from: Some(from.clone()),
                        to: to.clone(),
                    }],
                    [.., to] => vec![FileEvent::Moved {
                        from: None,
                        to: to.clone(),
                    }],
                    [] => Vec::new(),
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Vec::new(),
            EventKind::Modify(ModifyKind::Name(_)) => event
                .paths
                .iter()
                .map(|to| FileEvent::Moved {
                    from: None,
                    to: to.clone(),
                })
                .collect(),
            EventKind::Modify(_) => event
                .paths
                .iter()
                .cloned()
                .map(FileEvent::Modified)
                .collect(),
            EventKind::Access(_) | EventKind::Remove(_) | EventKind::Any | EventKind::Other => {
                Vec::new()
            }
        }
    }
}
