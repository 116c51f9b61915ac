//! Change classification and coalesced re-runs for watch mode.

use std::path::{Component, Path};
use std::sync::Arc;

use pagesmith_config::{AssetClass, EffectiveConfig};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::error::Result;
use crate::task::{Task, TaskReport};

/// What a changed path should trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchAction {
    /// Re-run the compile task of this class.
    Run(AssetClass),
    /// Tell preview clients to reload; nothing is rebuilt.
    Reload,
    Ignore,
}

/// Classify a changed path.
///
/// Styles, scripts and pages re-run their task. Images, fonts and anything in
/// the public directory only trigger a reload. Hidden files and everything
/// under the intermediate, output and dependency directories are ignored.
pub fn classify(config: &EffectiveConfig, path: &Path) -> WatchAction {
    if is_ignored(config, path) {
        return WatchAction::Ignore;
    }

    for class in [AssetClass::Styles, AssetClass::Scripts, AssetClass::Pages] {
        if config.file_group(class).matches(path) {
            return WatchAction::Run(class);
        }
    }
    for class in [AssetClass::Images, AssetClass::Fonts] {
        if config.file_group(class).matches(path) {
            return WatchAction::Reload;
        }
    }
    if path.starts_with(&config.public_dir) {
        return WatchAction::Reload;
    }

    WatchAction::Ignore
}

fn is_ignored(config: &EffectiveConfig, path: &Path) -> bool {
    let generated = [
        &config.intermediate_dir,
        &config.output_dir,
        &config.dependency_dir,
    ];
    if generated.iter().any(|dir| path.starts_with(dir)) {
        return true;
    }

    let relative = path.strip_prefix(&config.root).unwrap_or(path);
    relative.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

/// Runs one task on demand, coalescing overlapping requests.
///
/// While a run is in flight at most one further run is queued; extra
/// triggers are dropped. Every completed run is handed to `on_done`.
pub struct TaskWorker {
    name: String,
    trigger: mpsc::Sender<()>,
}

impl TaskWorker {
    pub fn spawn<F>(task: Arc<dyn Task>, on_done: F) -> Self
    where
        F: Fn(Result<TaskReport>) + Send + Sync + 'static,
    {
        let name = task.name().to_string();
        let (trigger, mut requests) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            while requests.recv().await.is_some() {
                on_done(task.run().await);
            }
        });

        Self { name, trigger }
    }

    /// Request a run. Returns `false` when one is already queued.
    pub fn trigger(&self) -> bool {
        match self.trigger.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => {
                tracing::trace!(task = %self.name, "run already queued");
                false
            }
            Err(TrySendError::Closed(())) => false,
        }
    }
}

impl std::fmt::Debug for TaskWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskWorker").field("name", &self.name).finish()
    }
}
