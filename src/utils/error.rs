//! The `error` module defines the error type shared across `wsrelay`.
//!
//! Only startup failures are fatal. Per-connection failures (closed sockets,
//! dropped outbound queues) are recovered where they happen and show up here
//! only so they can be logged with context.

use thiserror::Error;

use crate::registry::ConnectionId;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("connection {0} is closed")]
    ConnectionClosed(ConnectionId),
}
