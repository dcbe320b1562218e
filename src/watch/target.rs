// src/watch/target.rs

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{Result, TexwatchError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::path_utils::absolute_normalized;

/// The single file under surveillance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    path: PathBuf,
    dir: PathBuf,
    /// Same file seen through the canonicalized parent directory, when that
    /// differs from `path` (e.g. `/tmp` being a symlink to `/private/tmp`).
    canonical: Option<PathBuf>,
}

impl WatchTarget {
    /// Build a target against the real filesystem.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_fs(path, &RealFileSystem)
    }

    /// Create the target's directory if it is missing, then build the
    /// target. Canonicalization only sees a symlinked parent once the
    /// directory exists.
    pub fn prepare(path: impl AsRef<Path>) -> Result<Self> {
        let path = absolute_normalized(path.as_ref())?;
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                info!(?dir, "watch directory does not exist; creating it");
                fs::create_dir_all(dir)?;
            }
        }
        Self::new(path)
    }

    pub fn with_fs(path: impl AsRef<Path>, fs: &dyn FileSystem) -> Result<Self> {
        let raw = path.as_ref();
        let path = absolute_normalized(raw)?;

        let (dir, file_name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_os_string()),
            _ => {
                return Err(TexwatchError::ConfigError(format!(
                    "watch target {:?} does not name a file",
                    raw
                )));
            }
        };

        let canonical = fs
            .canonicalize(&dir)
            .ok()
            .map(|d| d.join(&file_name))
            .filter(|c| *c != path);

        Ok(Self {
            path,
            dir,
            canonical,
        })
    }

    /// Absolute path of the watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that gets subscribed to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Exact-match test for an event path. No prefix or pattern matching.
    pub fn matches(&self, candidate: &Path) -> bool {
        let candidate = match absolute_normalized(candidate) {
            Ok(p) => p,
            Err(_) => return false,
        };
        candidate == self.path || self.canonical.as_deref() == Some(candidate.as_path())
    }
}

impl fmt::Display for WatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
