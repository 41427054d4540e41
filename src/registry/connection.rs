use std::fmt;
use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::broadcast::RelayMessage;
use crate::utils::error::RelayError;

/// Unique identifier assigned to a connection when it is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(format!("conn-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a single connection.
///
/// `Connecting -> Open -> Closed`; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// Handle to a connected WebSocket client.
///
/// The socket itself is owned by the transport. The handle only carries the
/// sending half of the connection's outbound queue, which a dedicated writer
/// task drains onto the socket. Cloning the handle is cheap, which is what
/// lets the registry hand out snapshots.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    peer: Option<SocketAddr>,
    connected_at: DateTime<Utc>,
    sender: UnboundedSender<RelayMessage>,
}

impl Connection {
    pub fn new(peer: Option<SocketAddr>, sender: UnboundedSender<RelayMessage>) -> Self {
        Self {
            id: ConnectionId::new(),
            peer,
            connected_at: Utc::now(),
            sender,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    /// Queues `message` for delivery. Never blocks.
    ///
    /// Fails only once the writer side of the connection has gone away.
    pub fn send(&self, message: RelayMessage) -> Result<(), RelayError> {
        self.sender
            .send(message)
            .map_err(|_| RelayError::ConnectionClosed(self.id.clone()))
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
