//! The `transport` module is responsible for the network side of the relay.
//!
//! It serves the HTTP routes, upgrades `/ws` requests to WebSockets and
//! runs the per-connection handler that feeds received text into the
//! broadcaster.

pub mod handler;
pub mod http;
pub mod websocket;

use std::sync::Arc;

use crate::broadcast::Broadcaster;
use crate::config::RelaySettings;
use crate::registry::Registry;

pub use http::build_router;
pub use websocket::{serve, start_websocket_server};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub broadcaster: Broadcaster,
    prefix: Arc<str>,
}

impl AppState {
    pub fn new(relay: &RelaySettings) -> Self {
        let registry = Arc::new(Registry::new());
        Self {
            broadcaster: Broadcaster::new(registry.clone()),
            registry,
            prefix: Arc::from(relay.message_prefix.as_str()),
        }
    }

    pub fn prefix(&self) -> Arc<str> {
        self.prefix.clone()
    }
}
