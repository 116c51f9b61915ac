//! Routes file changes to compile tasks or reloads.
//!
//! | Change | Action |
//! |--------|--------|
//! | style / script / page source | re-run that task; it announces its output |
//! | image / font / public file | full reload |
//! | anything else | nothing |
//!
//! Each compile task has its own [`TaskWorker`], so a burst of saves runs
//! the task at most twice: the run in flight and one follow-up.

use crate::dev::{DevEvent, FileChange, SharedState};
use crate::ui;
use pagesmith_config::{AssetClass, EffectiveConfig};
use pagesmith_core::{
    BuildContext, ReloadEvent, ReloadSink, TaskWorker, WatchAction, classify, tasks,
};
use std::collections::HashMap;
use std::sync::Arc;

pub struct Orchestrator {
    config: Arc<EffectiveConfig>,
    state: SharedState,
    workers: HashMap<AssetClass, TaskWorker>,
}

impl Orchestrator {
    /// Spawn one worker per compile task. Must be called inside a Tokio runtime.
    ///
    /// `ctx` should carry `state` as its reload sink so finished runs reach
    /// the browser.
    pub fn new(ctx: &BuildContext, state: SharedState) -> Self {
        let workers = AssetClass::ALL
            .into_iter()
            .filter(AssetClass::is_compiled)
            .map(|class| {
                let task = tasks::for_class(class, ctx);
                let state = Arc::clone(&state);
                let worker = TaskWorker::spawn(task, move |result| match result {
                    Ok(report) => {
                        tracing::info!(
                            task = %report.name,
                            files = report.files.len(),
                            elapsed_ms = report.duration.as_millis() as u64,
                            "rebuilt"
                        );
                    }
                    Err(e) => {
                        let task = tasks::task_name(class).to_string();
                        ui::error(&format!("{task} failed: {e}"));
                        state.broadcast(&DevEvent::BuildFailed {
                            task,
                            error: e.to_string(),
                        });
                    }
                });
                (class, worker)
            })
            .collect();

        Self {
            config: Arc::clone(&ctx.config),
            state,
            workers,
        }
    }

    /// Act on one change and report what was done.
    pub fn handle(&self, change: &FileChange) -> WatchAction {
        let action = classify(&self.config, change.path());

        match action {
            WatchAction::Run(class) => {
                tracing::debug!(path = %change.path().display(), class = %class, "source changed");
                if let Some(worker) = self.workers.get(&class) {
                    worker.trigger();
                }
            }
            WatchAction::Reload => {
                tracing::debug!(path = %change.path().display(), "asset changed, reloading");
                self.state.reload(ReloadEvent::FullReload);
            }
            WatchAction::Ignore => {
                tracing::trace!(path = %change.path().display(), "ignored change");
            }
        }

        action
    }
}
