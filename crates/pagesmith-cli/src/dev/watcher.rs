//! File system watcher for dev mode.
//!
//! Watches the project root recursively. Events under generated directories
//! are dropped here so task output never loops back as a change; the rest is
//! classified by the orchestrator. Every event is forwarded: bursts from one
//! save are coalesced by the task workers, so the last write always gets a
//! run.

use crate::error::{CliError, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// Recursive file watcher with directory filtering.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Create a new file watcher.
    ///
    /// # Arguments
    ///
    /// * `root` - Root directory to watch recursively
    /// * `ignored_dirs` - Directories whose events are dropped
    ///
    /// # Errors
    ///
    /// Returns error if watcher cannot be created or directory doesn't exist
    pub fn new(
        root: PathBuf,
        ignored_dirs: Vec<PathBuf>,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);
        let watch_root = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "watch error");
                    return;
                }
            };

            for path in &event.paths {
                if Self::should_ignore(path, &watch_root, &ignored_dirs) {
                    continue;
                }

                let change = match event.kind {
                    notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                    notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                    notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                    _ => continue,
                };

                // Receiver gone means the dev loop is shutting down.
                let _ = tx.blocking_send(change);
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Events outside the root or inside an ignored directory are dropped.
    fn should_ignore(path: &Path, root: &Path, ignored_dirs: &[PathBuf]) -> bool {
        if !path.starts_with(root) {
            return true;
        }
        ignored_dirs.iter().any(|dir| path.starts_with(dir))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
