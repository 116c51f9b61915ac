//! Shared state for the preview server.
//!
//! Tracks connected SSE clients and fans [`DevEvent`]s out to them. The state
//! doubles as the [`ReloadSink`] handed to compile tasks.

use crate::dev::DevEvent;
use pagesmith_config::EffectiveConfig;
use pagesmith_core::{ReloadEvent, ReloadSink};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Per-client queue depth. A client this far behind misses events.
const CLIENT_BUFFER: usize = 100;

/// Connected SSE clients, keyed by id.
pub type ClientRegistry = Arc<RwLock<HashMap<usize, mpsc::Sender<String>>>>;

pub struct DevServerState {
    pub clients: ClientRegistry,
    next_client_id: RwLock<usize>,
    config: Arc<EffectiveConfig>,
}

impl DevServerState {
    pub fn new(config: Arc<EffectiveConfig>) -> Self {
        Self {
            clients: Arc::new(RwLock::new(HashMap::new())),
            next_client_id: RwLock::new(0),
            config,
        }
    }

    pub fn config(&self) -> &Arc<EffectiveConfig> {
        &self.config
    }

    /// Register a new SSE client.
    ///
    /// # Returns
    ///
    /// Client ID and receiver for serialized events
    pub fn register_client(&self) -> (usize, mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_client_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = mpsc::channel(CLIENT_BUFFER);
        self.clients.write().insert(id, tx);

        (id, rx)
    }

    pub fn unregister_client(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }

    /// Send an event to every connected client without waiting.
    ///
    /// Clients whose stream has closed are dropped from the registry.
    pub fn broadcast(&self, event: &DevEvent) {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize dev event");
                return;
            }
        };

        let clients = self.clients.read().clone();
        let mut closed = Vec::new();

        for (id, tx) in clients {
            match tx.try_send(json.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(client = id, "client is lagging, event dropped");
                }
                Err(TrySendError::Closed(_)) => closed.push(id),
            }
        }

        for id in closed {
            self.unregister_client(id);
        }
    }
}

impl ReloadSink for DevServerState {
    fn reload(&self, event: ReloadEvent) {
        self.broadcast(&event.into());
    }
}

/// Shared state handle for passing around the application.
pub type SharedState = Arc<DevServerState>;
