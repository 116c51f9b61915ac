//! Project resolution shared by all commands.

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use pagesmith_config::EffectiveConfig;
use std::path::{Path, PathBuf};

/// Resolve the project root: `--cwd` if given, else the current directory.
pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let root = match explicit {
        Some(dir) => std::path::absolute(dir)?,
        None => std::env::current_dir()?,
    };

    let meta = std::fs::metadata(&root).with_path(&root)?;
    if !meta.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    Ok(root)
}

/// Load the effective configuration for a command.
///
/// A missing or unreadable override never fails the command; an explicitly
/// named file that does not exist gets a warning.
pub fn load_config(project: &ProjectArgs) -> Result<EffectiveConfig> {
    let root = resolve_project_root(project.cwd.as_deref())?;
    let explicit = project.config.as_ref().map(|path| root.join(path));

    if let Some(path) = explicit.as_ref().filter(|path| !path.is_file()) {
        ui::warning(&format!(
            "Config file {} not found, using defaults",
            path.display()
        ));
    }

    let config = EffectiveConfig::resolve(&root, explicit.as_deref());
    tracing::debug!(
        root = %config.root.display(),
        src = %config.source_dir.display(),
        dist = %config.output_dir.display(),
        "configuration resolved"
    );
    Ok(config)
}
