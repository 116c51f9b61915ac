use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Default port of the preview server.
pub const DEFAULT_PORT: u16 = 2080;

/// Available pagesmith subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove the intermediate and output directories
    Clean(CleanArgs),

    /// Build the project into the output directory
    ///
    /// Cleans, compiles styles, scripts and pages, bundles build-reference
    /// blocks, minifies everything and copies images, fonts and public files.
    Build(BuildArgs),

    /// Compile once, then watch sources and serve a live-reloading preview
    Dev(DevArgs),
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root. Defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Configuration override file (page.config.toml or page.config.json)
    ///
    /// Relative paths are resolved against the project root. When omitted,
    /// the project root is searched for a config file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CleanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the dev command
#[derive(Args, Debug, Clone)]
pub struct DevArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Port for the preview server
    ///
    /// If the port is busy the next free one (up to +10) is used.
    #[arg(short, long, default_value_t = DEFAULT_PORT, value_name = "PORT")]
    pub port: u16,

    /// Open the preview in the default browser once the server is up
    #[arg(long)]
    pub open: bool,
}
