//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `pagesmith clean` - Remove generated directories
//! - `pagesmith build` - Production build
//! - `pagesmith dev` - Compile, watch and serve with live reload

mod commands;
mod tests;

use clap::Parser;

pub use commands::{BuildArgs, CleanArgs, Command, DEFAULT_PORT, DevArgs, ProjectArgs};

/// pagesmith - front-end asset pipeline
#[derive(Parser, Debug)]
#[command(
    name = "pagesmith",
    version,
    about = "Build and live-preview static front-end projects",
    long_about = "pagesmith compiles stylesheets, scripts and page templates, optimizes\n\
                  images and fonts, bundles annotated references and minifies the result.\n\
                  The dev command serves a live-reloading preview while you edit."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
