//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use ::miette::Report;
use pagesmith_core::TaskError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Task(e) => task_error_to_miette(e),
        CliError::Config(e) => ::miette::miette!(
            help = "Config files are page.config.toml or page.config.json in the project root",
            "Configuration error: {}",
            e
        ),
        CliError::Watch(e) => ::miette::miette!(
            help = "On Linux, raising fs.inotify.max_user_watches usually helps",
            "File watcher error: {}",
            e
        ),
        _ => ::miette::miette!("{}", err),
    }
}

/// Convert TaskError to miette Report
pub fn task_error_to_miette(err: TaskError) -> Report {
    match err {
        TaskError::UnresolvedReference { page, reference } => ::miette::miette!(
            help = "References are looked up in the intermediate directory, then the project root",
            "{} references '{}', which was not found",
            page.display(),
            reference
        ),
        TaskError::UnknownBlock { page, kind } => ::miette::miette!(
            help = "Supported build blocks are build:css, build:js and build:remove",
            "Unknown build block '{}' in {}",
            kind,
            page.display()
        ),
        TaskError::Transform(e) => ::miette::miette!("{}", e),
        _ => ::miette::miette!("Build failed: {}", err),
    }
}
