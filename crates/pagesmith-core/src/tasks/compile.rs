use std::path::PathBuf;

use async_trait::async_trait;
use pagesmith_config::AssetClass;

use crate::context::BuildContext;
use crate::error::Result;
use crate::fs;
use crate::reload::ReloadEvent;
use crate::task::{Task, TaskReport};

/// Style, script or page compilation into the intermediate directory.
///
/// After every successful run the written files are announced to the reload
/// sink, if one is attached.
pub struct CompileTask {
    class: AssetClass,
    ctx: BuildContext,
}

impl CompileTask {
    /// # Panics
    ///
    /// If `class` is not one of the compiled classes.
    pub fn new(class: AssetClass, ctx: BuildContext) -> Self {
        assert!(class.is_compiled(), "{class} is not a compiled asset class");
        Self { class, ctx }
    }

    pub fn style(ctx: BuildContext) -> Self {
        Self::new(AssetClass::Styles, ctx)
    }

    pub fn script(ctx: BuildContext) -> Self {
        Self::new(AssetClass::Scripts, ctx)
    }

    pub fn page(ctx: BuildContext) -> Self {
        Self::new(AssetClass::Pages, ctx)
    }
}

#[async_trait]
impl Task for CompileTask {
    fn name(&self) -> &str {
        super::task_name(self.class)
    }

    async fn run(&self) -> Result<TaskReport> {
        let class = self.class;
        let ctx = self.ctx.clone();
        let report = super::run_blocking(self.name(), move || compile_group(class, &ctx)).await?;

        let root = &self.ctx.config.intermediate_dir;
        let paths = report.files.iter().map(|f| fs::url_path(root, f)).collect();
        self.ctx.notify(ReloadEvent::inject(paths));

        Ok(report)
    }
}

fn compile_group(class: AssetClass, ctx: &BuildContext) -> Result<Vec<PathBuf>> {
    let group = ctx.config.file_group(class);
    let transformers = &ctx.transformers;
    let mut written = Vec::new();

    for source in fs::enumerate(&group)? {
        let dest = group.destination_for(&source);
        let text = fs::read_to_string(&source)?;

        let (dest, output) = match class {
            AssetClass::Styles => {
                if transformers.styles.is_partial(&source) {
                    continue;
                }
                (
                    transformers.styles.output_path(&dest),
                    transformers.styles.compile(&source, &text)?,
                )
            }
            AssetClass::Scripts => (dest, transformers.scripts.transpile(&source, &text)?),
            _ => (
                dest,
                transformers
                    .pages
                    .render(&source, &text, &ctx.config.template_data)?,
            ),
        };

        fs::write(&dest, output)?;
        tracing::trace!(from = %source.display(), to = %dest.display(), "compiled");
        written.push(dest);
    }

    Ok(written)
}
