//! pagesmith CLI - build and live-preview static front-end projects.
//!
//! The CLI exposes three commands on top of `pagesmith-core`:
//!
//! - `pagesmith clean` removes the intermediate and output directories
//! - `pagesmith build` produces an optimized, minified output directory
//! - `pagesmith dev` compiles once, then watches sources and serves a
//!   live-reloading preview
//!
//! # Architecture
//!
//! - [`error`] - CLI error types and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal output helpers
//! - [`dev`] - preview server, file watcher and change dispatch

pub mod cli;
pub mod commands;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
