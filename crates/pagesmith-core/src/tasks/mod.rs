//! Concrete tasks.
//!
//! | Task | Reads | Writes |
//! |------|-------|--------|
//! | `clean` | | removes intermediate and output dirs |
//! | `style` / `script` / `page` | source dir | intermediate dir |
//! | `image` / `font` | source dir | output dir |
//! | `extra` | public dir | output dir |
//! | `useref` | intermediate pages | output dir |

mod asset;
mod clean;
mod compile;
mod extra;
mod useref;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use pagesmith_config::AssetClass;

pub use asset::AssetTask;
pub use clean::CleanTask;
pub use compile::CompileTask;
pub use extra::ExtraTask;
pub use useref::UserefTask;

use crate::context::BuildContext;
use crate::error::{Result, TaskError};
use crate::task::{Task, TaskReport};

/// The transform task responsible for `class`.
pub fn for_class(class: AssetClass, ctx: &BuildContext) -> Arc<dyn Task> {
    match class {
        AssetClass::Styles | AssetClass::Scripts | AssetClass::Pages => {
            Arc::new(CompileTask::new(class, ctx.clone()))
        }
        AssetClass::Images | AssetClass::Fonts => Arc::new(AssetTask::new(class, ctx.clone())),
        AssetClass::Extra => Arc::new(ExtraTask::new(ctx.clone())),
    }
}

/// Task name for the transform task of `class`.
pub fn task_name(class: AssetClass) -> &'static str {
    match class {
        AssetClass::Styles => "style",
        AssetClass::Scripts => "script",
        AssetClass::Pages => "page",
        AssetClass::Images => "image",
        AssetClass::Fonts => "font",
        AssetClass::Extra => "extra",
    }
}

/// Run file work on a blocking thread and time it.
pub(crate) async fn run_blocking<F>(name: &str, work: F) -> Result<TaskReport>
where
    F: FnOnce() -> Result<Vec<PathBuf>> + Send + 'static,
{
    let started = Instant::now();
    let files = tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| TaskError::Aborted {
            task: name.to_string(),
            message: e.to_string(),
        })??;

    let report = TaskReport {
        name: name.to_string(),
        files,
        duration: started.elapsed(),
    };
    tracing::debug!(
        task = name,
        files = report.files.len(),
        elapsed_ms = report.duration.as_millis() as u64,
        "task finished"
    );
    Ok(report)
}
