//! The `registry` module tracks the set of currently open connections.
//!
//! A connection is present in the [`Registry`] if and only if it has been
//! accepted and not yet removed. All access goes through `add`, `remove` and
//! `snapshot`; each call takes the internal lock for a single map operation
//! and never holds it across a send.

pub mod connection;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

pub use connection::{Connection, ConnectionId, ConnectionState};

#[derive(Debug, Default)]
pub struct Registry {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section is one map operation, so a poisoned lock never
    // guards a half-updated map.
    fn lock(&self) -> MutexGuard<'_, HashMap<ConnectionId, Connection>> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an accepted connection.
    pub fn add(&self, connection: Connection) {
        let id = connection.id().clone();
        let total = {
            let mut connections = self.lock();
            connections.insert(id.clone(), connection);
            connections.len()
        };
        debug!(connection = %id, total, "registered connection");
    }

    /// Removes a connection if present.
    ///
    /// Safe to call more than once for the same id: the read loop and a failed
    /// broadcast may both try to remove the same entry. Returns whether this
    /// call removed it.
    pub fn remove(&self, id: &ConnectionId) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            debug!(connection = %id, "removed connection");
        }
        removed
    }

    /// Point-in-time copy of the current membership.
    pub fn snapshot(&self) -> Vec<Connection> {
        self.lock().values().cloned().collect()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
