//! Live preview: server, file watcher and change dispatch.
//!
//! - The server answers from the intermediate, source and public directories
//!   in that order, exposes `node_modules` under `/node_modules`, and pushes
//!   [`DevEvent`]s to browsers over Server-Sent Events.
//! - The watcher feeds changed paths to the [`Orchestrator`], which re-runs
//!   the matching compile task or asks clients to reload.

pub mod config;
pub mod orchestrator;
pub mod server;
pub mod state;
pub mod watcher;

pub use config::DevConfig;
pub use orchestrator::Orchestrator;
pub use server::DevServer;
pub use state::{DevServerState, SharedState};
pub use watcher::{FileChange, FileWatcher};

use pagesmith_core::ReloadEvent;
use serde::{Deserialize, Serialize};

/// Messages pushed to preview clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DevEvent {
    /// Swap these resources in place; stylesheets only, anything else reloads.
    Inject { paths: Vec<String> },

    FullReload,

    /// A re-run failed. The page keeps showing the last good output.
    BuildFailed { task: String, error: String },

    ClientConnected { id: usize },
}

impl From<ReloadEvent> for DevEvent {
    fn from(event: ReloadEvent) -> Self {
        match event {
            ReloadEvent::Inject { paths } => DevEvent::Inject { paths },
            ReloadEvent::FullReload => DevEvent::FullReload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_event_wire_format() {
        let json = serde_json::to_string(&DevEvent::BuildFailed {
            task: "style".into(),
            error: "bad".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"buildFailed","task":"style","error":"bad"}"#);
    }

    #[test]
    fn test_from_reload_event() {
        assert_eq!(DevEvent::from(ReloadEvent::FullReload), DevEvent::FullReload);
        assert_eq!(
            DevEvent::from(ReloadEvent::inject(vec!["/a.css".into()])),
            DevEvent::Inject {
                paths: vec!["/a.css".into()]
            }
        );
    }
}
