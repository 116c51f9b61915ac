//! Series/parallel composition of tasks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, join_all};
use futures::FutureExt;

use crate::context::BuildContext;
use crate::error::Result;
use crate::task::{Task, TaskReport};
use crate::tasks::{AssetTask, CleanTask, CompileTask, ExtraTask, UserefTask};

/// A tree of tasks.
///
/// `Series` runs its children in order and stops at the first failure, so
/// nothing downstream of a failed step starts. `Parallel` starts every child
/// at once, waits for all of them, and reports the first failure.
#[derive(Clone)]
pub enum Pipeline {
    Task(Arc<dyn Task>),
    Series(Vec<Pipeline>),
    Parallel(Vec<Pipeline>),
}

/// Reports of every task that completed, in completion order per branch.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub tasks: Vec<TaskReport>,
    pub duration: Duration,
}

impl PipelineReport {
    pub fn files_written(&self) -> usize {
        self.tasks.iter().map(|t| t.files.len()).sum()
    }

    pub fn task(&self, name: &str) -> Option<&TaskReport> {
        self.tasks.iter().find(|t| t.name == name)
    }
}

impl Pipeline {
    pub fn task(task: impl Task + 'static) -> Self {
        Self::Task(Arc::new(task))
    }

    /// Names of all leaf tasks, depth first.
    pub fn task_names(&self) -> Vec<String> {
        match self {
            Self::Task(task) => vec![task.name().to_string()],
            Self::Series(children) | Self::Parallel(children) => {
                children.iter().flat_map(Pipeline::task_names).collect()
            }
        }
    }

    pub async fn run(&self) -> Result<PipelineReport> {
        let started = Instant::now();
        let tasks = self.run_node().await?;
        Ok(PipelineReport {
            tasks,
            duration: started.elapsed(),
        })
    }

    fn run_node(&self) -> BoxFuture<'_, Result<Vec<TaskReport>>> {
        async move {
            match self {
                Self::Task(task) => {
                    tracing::debug!(task = task.name(), "starting");
                    let report = task.run().await.inspect_err(|e| {
                        tracing::debug!(task = task.name(), error = %e, "failed");
                    })?;
                    Ok(vec![report])
                }
                Self::Series(children) => {
                    let mut reports = Vec::new();
                    for child in children {
                        reports.extend(child.run_node().await?);
                    }
                    Ok(reports)
                }
                Self::Parallel(children) => {
                    let results = join_all(children.iter().map(Pipeline::run_node)).await;
                    let mut reports = Vec::new();
                    let mut first_error = None;
                    for result in results {
                        match result {
                            Ok(done) => reports.extend(done),
                            Err(e) if first_error.is_none() => first_error = Some(e),
                            Err(e) => tracing::error!(error = %e, "additional parallel failure"),
                        }
                    }
                    match first_error {
                        Some(e) => Err(e),
                        None => Ok(reports),
                    }
                }
            }
        }
        .boxed()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(task) => write!(f, "{}", task.name()),
            Self::Series(children) => f.debug_tuple("series").field(children).finish(),
            Self::Parallel(children) => f.debug_tuple("parallel").field(children).finish(),
        }
    }
}

/// `clean`
pub fn clean(ctx: &BuildContext) -> Pipeline {
    Pipeline::task(CleanTask::new(ctx.clone()))
}

/// `parallel(style, script, page)`
pub fn compile(ctx: &BuildContext) -> Pipeline {
    Pipeline::Parallel(vec![
        Pipeline::task(CompileTask::style(ctx.clone())),
        Pipeline::task(CompileTask::script(ctx.clone())),
        Pipeline::task(CompileTask::page(ctx.clone())),
    ])
}

/// `series(clean, parallel(series(compile, useref), image, font, extra))`
pub fn build(ctx: &BuildContext) -> Pipeline {
    Pipeline::Series(vec![
        clean(ctx),
        Pipeline::Parallel(vec![
            Pipeline::Series(vec![
                compile(ctx),
                Pipeline::task(UserefTask::new(ctx.clone())),
            ]),
            Pipeline::task(AssetTask::image(ctx.clone())),
            Pipeline::task(AssetTask::font(ctx.clone())),
            Pipeline::task(ExtraTask::new(ctx.clone())),
        ]),
    ])
}
