//! Command implementations.
//!
//! Each command exposes an `execute` function taking its parsed arguments.

pub mod build;
pub mod clean;
pub mod dev;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use clean::execute as clean_execute;
pub use dev::execute as dev_execute;
