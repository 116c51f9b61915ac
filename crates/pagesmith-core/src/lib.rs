//! Task graph for the pagesmith asset pipeline.
//!
//! Every unit of work is a [`Task`] constructed from a shared
//! [`BuildContext`]. Tasks are composed into [`Pipeline`]s with series and
//! parallel combinators:
//!
//! ```text
//! compile = parallel(style, script, page)
//! build   = series(clean, parallel(series(compile, useref), image, font, extra))
//! ```
//!
//! The watch side lives in [`watch`]: changed paths are classified into a
//! [`WatchAction`], and re-runs are funnelled through a coalescing
//! [`TaskWorker`] so at most one follow-up run is ever queued per task.

pub mod context;
pub mod error;
pub mod fs;
pub mod pipeline;
pub mod references;
pub mod reload;
pub mod task;
pub mod tasks;
pub mod watch;

pub use context::BuildContext;
pub use error::{Result, TaskError};
pub use pipeline::{Pipeline, PipelineReport};
pub use reload::{ReloadEvent, ReloadSink};
pub use task::{Task, TaskReport};
pub use watch::{TaskWorker, WatchAction, classify};
