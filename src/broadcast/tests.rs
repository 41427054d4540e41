use super::{BroadcastReport, Broadcaster, RelayMessage};
use crate::registry::{Connection, Registry};
use std::sync::Arc;
use tokio::sync::mpsc;

fn register(registry: &Registry) -> (Connection, mpsc::UnboundedReceiver<RelayMessage>) {
    let (tx, rx) = mpsc::unbounded_channel::<RelayMessage>();
    let conn = Connection::new(None, tx);
    registry.add(conn.clone());
    (conn, rx)
}

#[test]
fn test_relayed_message_has_prefix() {
    let msg = RelayMessage::relayed("📦 ", "hello");
    assert_eq!(msg.as_str(), "📦 hello");
    assert_eq!(msg.to_string(), "📦 hello");
}

#[test]
fn test_broadcast_to_empty_registry() {
    let broadcaster = Broadcaster::new(Arc::new(Registry::new()));
    let report = broadcaster.broadcast(&RelayMessage::new("nobody"));
    assert_eq!(report, BroadcastReport::default());
}

#[test]
fn test_broadcast_reaches_every_connection() {
    let registry = Arc::new(Registry::new());
    let broadcaster = Broadcaster::new(registry.clone());
    let mut receivers: Vec<_> = (0..3).map(|_| register(&registry).1).collect();

    let report = broadcaster.broadcast(&RelayMessage::new("📦 ping"));
    assert_eq!(report.delivered, 3);
    assert_eq!(report.failed, 0);

    for rx in &mut receivers {
        let received = rx.try_recv().unwrap();
        assert_eq!(received.as_str(), "📦 ping");
        assert!(rx.try_recv().is_err());
    }
}

#[test]
fn test_broadcast_skips_and_removes_closed_connection() {
    let registry = Arc::new(Registry::new());
    let broadcaster = Broadcaster::new(registry.clone());
    let (_alive, mut alive_rx) = register(&registry);
    let (dead, dead_rx) = register(&registry);
    let (_other, mut other_rx) = register(&registry);

    // Drop the receiver to close the channel
    drop(dead_rx);

    let report = broadcaster.broadcast(&RelayMessage::new("still here"));
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, 1);
    assert!(!registry.contains(dead.id()));
    assert_eq!(registry.len(), 2);

    assert_eq!(alive_rx.try_recv().unwrap().as_str(), "still here");
    assert_eq!(other_rx.try_recv().unwrap().as_str(), "still here");

    // the failed recipient is no longer targeted
    let report = broadcaster.broadcast(&RelayMessage::new("again"));
    assert_eq!(report, BroadcastReport { delivered: 2, failed: 0 });
}

#[test]
fn test_broadcast_does_not_target_removed_connection() {
    let registry = Arc::new(Registry::new());
    let broadcaster = Broadcaster::new(registry.clone());
    let (gone, mut gone_rx) = register(&registry);
    let (_stays, mut stays_rx) = register(&registry);

    registry.remove(gone.id());
    broadcaster.broadcast(&RelayMessage::new("after leave"));

    assert!(gone_rx.try_recv().is_err());
    assert_eq!(stays_rx.try_recv().unwrap().as_str(), "after leave");
}
