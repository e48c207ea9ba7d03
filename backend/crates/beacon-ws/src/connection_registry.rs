use crate::{Connection, ConnectionId};

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::RwLock;

/// Registry of live WebSocket connections.
///
/// Cheap to clone; every clone shares the same map. A connection is present
/// from its open callback until its close (or error) callback.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

#[derive(Default)]
struct RegistryInner {
    connections: HashMap<ConnectionId, Arc<dyn Connection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection. Re-adding the same id replaces the entry.
    pub async fn add(&self, connection: Arc<dyn Connection>) {
        let connection_id = connection.id();
        let mut inner = self.inner.write().await;

        if inner.connections.insert(connection_id, connection).is_some() {
            debug!("Connection {connection_id} was already registered");
        } else {
            info!(
                "Registered connection {connection_id} ({} total)",
                inner.connections.len()
            );
        }
    }

    /// Unregister a connection. Absent ids are ignored.
    ///
    /// Returns true when an entry was actually removed.
    pub async fn remove(&self, connection_id: ConnectionId) -> bool {
        let mut inner = self.inner.write().await;

        let removed = inner.connections.remove(&connection_id).is_some();
        if removed {
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                inner.connections.len()
            );
        }
        removed
    }

    /// Point-in-time copy of the registered connections, in no particular order.
    ///
    /// The lock is released before returning, so callers can do I/O on the
    /// result while other tasks keep adding and removing.
    pub async fn snapshot(&self) -> Vec<Arc<dyn Connection>> {
        let inner = self.inner.read().await;
        inner.connections.values().cloned().collect()
    }

    pub async fn contains(&self, connection_id: ConnectionId) -> bool {
        let inner = self.inner.read().await;
        inner.connections.contains_key(&connection_id)
    }

    pub async fn len(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
