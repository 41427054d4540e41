use std::sync::Arc;

use tracing::{debug, warn};

use crate::broadcast::RelayMessage;
use crate::registry::Registry;

/// Outcome of one fan-out, for logging and tests.
///
/// The sender of the original message never sees this.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Delivers messages to every connection in the registry.
///
/// Delivery is best-effort: recipients are taken from a snapshot, each send
/// is independent, and there is no ordering or atomicity across recipients.
/// A connection that joins mid-broadcast may or may not get the message.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<Registry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Sends `message` to every registered connection, the original sender
    /// included.
    ///
    /// A recipient whose outbound queue is closed is removed from the
    /// registry right away and skipped; the rest still get the message.
    pub fn broadcast(&self, message: &RelayMessage) -> BroadcastReport {
        let recipients = self.registry.snapshot();
        let mut report = BroadcastReport::default();

        for connection in &recipients {
            match connection.send(message.clone()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(connection = %connection.id(), error = %e, "dropping unreachable connection");
                    self.registry.remove(connection.id());
                    report.failed += 1;
                }
            }
        }

        debug!(
            delivered = report.delivered,
            failed = report.failed,
            bytes = message.len(),
            "broadcast complete"
        );
        report
    }
}
