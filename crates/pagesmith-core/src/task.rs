use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of one successful task run.
#[derive(Debug, Clone, Default)]
pub struct TaskReport {
    pub name: String,
    /// Files written, in the order they were produced.
    pub files: Vec<PathBuf>,
    pub duration: Duration,
}

impl TaskReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named unit of work. Construction fixes everything the task reads;
/// `run` may be called any number of times.
#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> Result<TaskReport>;
}
