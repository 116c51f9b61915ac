//! Live-reload notifications emitted by compile tasks.

use serde::Serialize;
use tokio::sync::broadcast;

/// What connected preview clients should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ReloadEvent {
    /// Refresh only these resources (URL paths) in place.
    Inject { paths: Vec<String> },
    /// Reload the whole page.
    FullReload,
}

impl ReloadEvent {
    pub fn inject(paths: Vec<String>) -> Self {
        Self::Inject { paths }
    }
}

/// Receiver of reload notifications. Implementations must not block.
pub trait ReloadSink: Send + Sync {
    fn reload(&self, event: ReloadEvent);
}

impl ReloadSink for broadcast::Sender<ReloadEvent> {
    fn reload(&self, event: ReloadEvent) {
        // No subscribers is fine.
        let _ = self.send(event);
    }
}
