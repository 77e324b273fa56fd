//! Namespace isolation and lifecycle tests.

use livefeed::{FeedManager, MemoryTransport, NamespaceConfig, WindowEvent};
use std::sync::Arc;
use std::time::Duration;

fn make_manager() -> (Arc<MemoryTransport>, FeedManager) {
    let transport = Arc::new(MemoryTransport::connected());
    let manager = FeedManager::new(transport.clone());
    (transport, manager)
}

fn live_config() -> NamespaceConfig {
    NamespaceConfig {
        start_paused: false,
        ..Default::default()
    }
}

#[test]
fn test_identical_patterns_stay_isolated() {
    let (_transport, manager) = make_manager();
    let a = manager.get_or_create("a", live_config()).unwrap();
    let b = manager.get_or_create("b", live_config()).unwrap();

    a.subscribe("orders.*").unwrap();
    b.subscribe("orders.*").unwrap();

    // Pause B only; the same delivery reaches A but never B.
    b.toggle_pause();
    manager.dispatch("orders.created", b"{}");

    assert_eq!(a.len(), 1);
    assert!(b.is_empty());
    assert_eq!(b.subscriptions()[0].message_count, 0);
}

#[test]
fn test_windows_do_not_share_capacity() {
    let (_transport, manager) = make_manager();
    let small = manager
        .get_or_create(
            "small",
            NamespaceConfig {
                capacity: 2,
                start_paused: false,
                ..Default::default()
            },
        )
        .unwrap();
    let large = manager
        .get_or_create(
            "large",
            NamespaceConfig {
                capacity: 100,
                start_paused: false,
                ..Default::default()
            },
        )
        .unwrap();

    small.subscribe(">").unwrap();
    large.subscribe(">").unwrap();

    for i in 0..10 {
        manager.dispatch(&format!("t.{}", i), b"{}");
    }

    assert_eq!(small.len(), 2);
    assert_eq!(large.len(), 10);
}

#[test]
fn test_clear_is_scoped_to_one_namespace() {
    let (_transport, manager) = make_manager();
    let a = manager.get_or_create("a", live_config()).unwrap();
    let b = manager.get_or_create("b", live_config()).unwrap();
    a.subscribe(">").unwrap();
    b.subscribe(">").unwrap();

    manager.dispatch("t", b"{}");
    manager.clear("a");

    assert!(a.is_empty());
    assert_eq!(b.len(), 1);
}

#[test]
fn test_teardown_releases_only_own_subscriptions() {
    let (transport, manager) = make_manager();
    let a = manager.get_or_create("a", live_config()).unwrap();
    let b = manager.get_or_create("b", live_config()).unwrap();
    a.subscribe("orders.*").unwrap();
    b.subscribe("orders.*").unwrap();

    manager.teardown("a");

    // B's transport-level subscription survives A's teardown.
    assert_eq!(transport.unsubscribe_calls().len(), 1);
    assert_eq!(transport.active_patterns(), vec!["orders.*".to_string()]);

    manager.dispatch("orders.created", b"{}");
    assert!(a.is_empty());
    assert_eq!(b.len(), 1);
}

#[test]
fn test_teardown_completes_when_transport_is_down() {
    let (transport, manager) = make_manager();
    let ns = manager.get_or_create("a", live_config()).unwrap();
    ns.subscribe("orders.*").unwrap();
    ns.subscribe("invoices.*").unwrap();

    // Unsubscribe will fail; teardown must still complete and release
    // local state.
    transport.set_status(livefeed::ConnectionStatus::Disconnected);
    manager.teardown("a");

    assert!(ns.is_torn_down());
    assert_eq!(manager.namespace_count(), 0);
}

#[test]
fn test_torn_down_is_terminal() {
    let (_transport, manager) = make_manager();
    let ns = manager.get_or_create("a", live_config()).unwrap();
    ns.subscribe(">").unwrap();
    let handle = ns.watch();

    manager.teardown("a");
    let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
    assert!(matches!(event, WindowEvent::TornDown));

    // Retained handle is inert after teardown.
    manager.dispatch("t", b"{}");
    assert!(ns.snapshot().is_empty());
    // Pause flag no longer flips once torn down.
    assert!(!ns.toggle_pause());

    // Same key creates a fresh namespace, not a resurrection.
    let fresh = manager.get_or_create("a", live_config()).unwrap();
    assert!(!fresh.is_torn_down());
    assert!(fresh.subscriptions().is_empty());
}

#[test]
fn test_message_ids_unique_across_namespaces() {
    let (_transport, manager) = make_manager();
    let a = manager.get_or_create("a", live_config()).unwrap();
    let b = manager.get_or_create("b", live_config()).unwrap();
    a.subscribe(">").unwrap();
    b.subscribe(">").unwrap();

    for i in 0..5 {
        manager.dispatch(&format!("t.{}", i), b"{}");
    }

    let mut ids: Vec<u64> = a
        .snapshot()
        .iter()
        .chain(b.snapshot().iter())
        .map(|m| m.id.0)
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}
