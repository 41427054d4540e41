use std::sync::Arc;

use tracing::{debug, info};

use crate::broadcast::{BroadcastReport, Broadcaster, RelayMessage};
use crate::registry::{Connection, ConnectionId, ConnectionState, Registry};

/// Drives one connection through `Connecting -> Open -> Closed`.
///
/// The handler owns the registry side effects of each transition, so the
/// socket loop only reports events. Dropping the handler closes it, which
/// keeps the registry free of stale entries even if the socket task is
/// cancelled.
#[derive(Debug)]
pub struct ConnectionHandler {
    connection: Connection,
    state: ConnectionState,
    registry: Arc<Registry>,
    broadcaster: Broadcaster,
    prefix: Arc<str>,
}

impl ConnectionHandler {
    pub fn new(connection: Connection, broadcaster: Broadcaster, prefix: Arc<str>) -> Self {
        Self {
            connection,
            state: ConnectionState::Connecting,
            registry: broadcaster.registry().clone(),
            broadcaster,
            prefix,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        self.connection.id()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Handshake finished: make the connection visible to broadcasts.
    pub fn open(&mut self) {
        if self.state != ConnectionState::Connecting {
            return;
        }
        self.registry.add(self.connection.clone());
        self.state = ConnectionState::Open;
        info!(
            connection = %self.connection.id(),
            peer = ?self.connection.peer(),
            "client connected"
        );
    }

    /// Relays a text message from this client to everyone, itself included.
    ///
    /// Returns `None` unless the connection is open.
    pub fn on_text(&self, text: &str) -> Option<BroadcastReport> {
        if self.state != ConnectionState::Open {
            return None;
        }
        debug!(connection = %self.connection.id(), bytes = text.len(), "received message");
        let message = RelayMessage::relayed(&self.prefix, text);
        Some(self.broadcaster.broadcast(&message))
    }

    /// Terminal transition. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        let was_open = self.state == ConnectionState::Open;
        self.state = ConnectionState::Closed;
        self.registry.remove(self.connection.id());

        if was_open {
            let connected_for = chrono::Utc::now() - self.connection.connected_at();
            info!(
                connection = %self.connection.id(),
                peer = ?self.connection.peer(),
                connected_secs = connected_for.num_seconds(),
                "client disconnected"
            );
        }
    }
}

impl Drop for ConnectionHandler {
    fn drop(&mut self) {
        self.close();
    }
}
