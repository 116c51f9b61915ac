use std::path::PathBuf;

use async_trait::async_trait;
use pagesmith_config::AssetClass;

use crate::context::BuildContext;
use crate::error::Result;
use crate::fs;
use crate::task::{Task, TaskReport};

/// Image or font optimization straight into the output directory.
pub struct AssetTask {
    class: AssetClass,
    ctx: BuildContext,
}

impl AssetTask {
    pub fn new(class: AssetClass, ctx: BuildContext) -> Self {
        Self { class, ctx }
    }

    pub fn image(ctx: BuildContext) -> Self {
        Self::new(AssetClass::Images, ctx)
    }

    pub fn font(ctx: BuildContext) -> Self {
        Self::new(AssetClass::Fonts, ctx)
    }
}

#[async_trait]
impl Task for AssetTask {
    fn name(&self) -> &str {
        super::task_name(self.class)
    }

    async fn run(&self) -> Result<TaskReport> {
        let class = self.class;
        let ctx = self.ctx.clone();
        super::run_blocking(self.name(), move || optimize_group(class, &ctx)).await
    }
}

fn optimize_group(class: AssetClass, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let group = ctx.config.file_group(class);
    let mut written = Vec::new();

    for source in fs::enumerate(&group)? {
        let dest = group.destination_for(&source);
        let bytes = fs::read(&source)?;
        let original = bytes.len();
        let optimized = ctx.transformers.assets.optimize(&source, bytes)?;

        if optimized.len() < original {
            tracing::debug!(
                file = %source.display(),
                before = original,
                after = optimized.len(),
                "optimized"
            );
        }
        fs::write(&dest, optimized)?;
        written.push(dest);
    }

    Ok(written)
}
