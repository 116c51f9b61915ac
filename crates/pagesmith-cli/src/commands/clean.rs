//! `pagesmith clean`

use crate::cli::CleanArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use pagesmith_core::{BuildContext, pipeline};

pub async fn execute(args: CleanArgs) -> Result<()> {
    let config = utils::load_config(&args.project)?;
    let ctx = BuildContext::with_defaults(config);

    pipeline::clean(&ctx).run().await?;

    ui::success(&format!(
        "Removed {} and {}",
        ctx.config.intermediate_dir.display(),
        ctx.config.output_dir.display()
    ));
    Ok(())
}
