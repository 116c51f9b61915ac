use std::time::Instant;

use async_trait::async_trait;

use crate::context::BuildContext;
use crate::error::Result;
use crate::fs;
use crate::task::{Task, TaskReport};

/// Removes the intermediate and output directories. Missing ones are fine.
pub struct CleanTask {
    ctx: BuildContext,
}

impl CleanTask {
    pub fn new(ctx: BuildContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Task for CleanTask {
    fn name(&self) -> &str {
        "clean"
    }

    async fn run(&self) -> Result<TaskReport> {
        let started = Instant::now();
        let config = &self.ctx.config;

        for dir in [&config.output_dir, &config.intermediate_dir] {
            if fs::remove_dir_if_exists(dir).await? {
                tracing::debug!(dir = %dir.display(), "removed");
            }
        }

        Ok(TaskReport {
            duration: started.elapsed(),
            ..TaskReport::new(self.name())
        })
    }
}
