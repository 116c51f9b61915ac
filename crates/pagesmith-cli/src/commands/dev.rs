//! `pagesmith dev`
//!
//! 1. Resolve the project and pick a port
//! 2. Compile styles, scripts and pages once
//! 3. Start the file watcher and the preview server
//! 4. Dispatch changes until Ctrl+C

use crate::cli::DevArgs;
use crate::dev::{DevConfig, DevServer, DevServerState, FileWatcher, Orchestrator};
use crate::error::Result;
use crate::ui;
use pagesmith_core::{BuildContext, ReloadSink, pipeline};
use std::sync::Arc;
use tokio::signal;

/// Execute the dev command.
///
/// # Errors
///
/// Returns errors for a missing project root, a failed initial compile,
/// watcher setup failures, or when no port is free.
pub async fn execute(args: DevArgs) -> Result<()> {
    let config = DevConfig::from_args(&args)?;
    let project = Arc::new(config.project.clone());
    ui::info(&format!("Working directory: {}", project.root.display()));

    let state = Arc::new(DevServerState::new(Arc::clone(&project)));
    let sink: Arc<dyn ReloadSink> = state.clone();
    let ctx = BuildContext::with_defaults(Arc::clone(&project)).with_reload(sink);

    let spinner = ui::Spinner::new("Compiling...");
    match pipeline::compile(&ctx).run().await {
        Ok(report) => spinner.finish(&format!(
            "Compiled {} files in {}",
            report.files_written(),
            ui::format_duration(report.duration)
        )),
        Err(e) => {
            spinner.fail("Initial compile failed");
            return Err(e.into());
        }
    }

    let ignored = vec![
        project.intermediate_dir.clone(),
        project.output_dir.clone(),
        project.dependency_dir.clone(),
    ];
    let (watcher, mut change_rx) = FileWatcher::new(project.root.clone(), ignored)?;
    ui::info(&format!(
        "Watching for changes in: {}",
        watcher.root().display()
    ));

    let orchestrator = Orchestrator::new(&ctx, Arc::clone(&state));

    let url = config.server_url();
    let server = DevServer::new(config.clone(), Arc::clone(&state));
    let mut server_handle = tokio::spawn(server.start());

    if config.open {
        open_browser(&url);
    }

    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(change) = change_rx.recv() => {
                orchestrator.handle(&change);
            }

            _ = signal::ctrl_c() => {
                ui::info("Shutting down development server...");
                break;
            }

            result = &mut server_handle => {
                match result {
                    Ok(Err(e)) => return Err(e),
                    Ok(Ok(())) => ui::warning("Server task completed unexpectedly"),
                    Err(e) => ui::error(&format!("Server task panicked: {e}")),
                }
                break;
            }
        }
    }

    ui::success("Development server stopped");
    Ok(())
}

/// Open the server URL in the default browser.
fn open_browser(url: &str) {
    use std::process::Command;

    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => ui::info(&format!("Opened browser at {url}")),
        Err(e) => ui::warning(&format!("Failed to open browser: {e}")),
    }
}
