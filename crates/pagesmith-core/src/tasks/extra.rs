use std::path::PathBuf;

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::context::BuildContext;
use crate::error::{IoResultExt, Result, TaskError};
use crate::task::{Task, TaskReport};

/// Copies the public directory verbatim into the output directory.
pub struct ExtraTask {
    ctx: BuildContext,
}

impl ExtraTask {
    pub fn new(ctx: BuildContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Task for ExtraTask {
    fn name(&self) -> &str {
        "extra"
    }

    async fn run(&self) -> Result<TaskReport> {
        let ctx = self.ctx.clone();
        super::run_blocking(self.name(), move || copy_public(&ctx)).await
    }
}

fn copy_public(ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let public = &ctx.config.public_dir;
    let output = &ctx.config.output_dir;
    if !public.is_dir() {
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    for entry in WalkDir::new(public).sort_by_file_name() {
        let entry = entry.map_err(|e| TaskError::Io {
            path: e.path().map(|p| p.to_path_buf()).unwrap_or_else(|| public.clone()),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(public).unwrap_or(entry.path());
        let dest = output.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).at(parent)?;
        }
        std::fs::copy(entry.path(), &dest).at(&dest)?;
        written.push(dest);
    }

    Ok(written)
}
