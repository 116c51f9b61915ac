//! `pagesmith build`
//!
//! Runs `series(clean, parallel(series(compile, useref), image, font, extra))`
//! and prints a per-task summary.

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use pagesmith_core::{BuildContext, PipelineReport, pipeline};

/// Execute the build command.
///
/// # Errors
///
/// Returns the first task failure. Tasks downstream of a failed step are
/// not started; independent branches still run to completion.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let config = utils::load_config(&args.project)?;
    ui::info(&format!("Building {}", config.root.display()));

    let report = run(BuildContext::with_defaults(config)).await?;

    ui::print_build_summary(&report);
    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(report.duration)
    ));
    Ok(())
}

/// Run the build pipeline with a spinner.
pub async fn run(ctx: BuildContext) -> Result<PipelineReport> {
    let graph = pipeline::build(&ctx);
    tracing::debug!(pipeline = ?graph, "running build");

    let spinner = ui::Spinner::new("Building...");
    match graph.run().await {
        Ok(report) => {
            spinner.finish(&format!("Wrote {} files", report.files_written()));
            Ok(report)
        }
        Err(e) => {
            spinner.fail("Build failed");
            Err(e.into())
        }
    }
}
