//! In-process transport double.

use super::{ConnectionStatus, Transport, TransportSubscription};
use crate::error::{FeedError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Buffer size for status streams handed out by [`MemoryTransport`].
const STATUS_BUFFER: usize = 64;

/// An in-process [`Transport`] that records subscribe and unsubscribe
/// calls instead of talking to a broker. Tests force it disconnected to
/// exercise the `TransportUnavailable` path and inspect which patterns
/// are currently held.
pub struct MemoryTransport {
    inner: Mutex<Inner>,
    next_id: AtomicU64,
}

struct Inner {
    status: ConnectionStatus,
    /// Live transport-level subscriptions by handle id.
    active: HashMap<u64, String>,
    /// Every pattern ever passed to subscribe, in call order.
    subscribe_calls: Vec<String>,
    /// Every pattern ever released, in call order.
    unsubscribe_calls: Vec<String>,
    status_watchers: Vec<Sender<ConnectionStatus>>,
}

impl MemoryTransport {
    /// Create a transport in the `Disconnected` state.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                status: ConnectionStatus::Disconnected,
                active: HashMap::new(),
                subscribe_calls: Vec::new(),
                unsubscribe_calls: Vec::new(),
                status_watchers: Vec::new(),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a transport already in the `Connected` state.
    pub fn connected() -> Self {
        let transport = Self::new();
        transport.set_status(ConnectionStatus::Connected);
        transport
    }

    /// Force a status, broadcasting the transition to status watchers.
    pub fn set_status(&self, status: ConnectionStatus) {
        let mut inner = self.inner.lock();
        inner.status = status.clone();
        inner
            .status_watchers
            .retain(|sender| sender.try_send(status.clone()).is_ok());
    }

    /// Patterns with a live transport-level subscription.
    pub fn active_patterns(&self) -> Vec<String> {
        let inner = self.inner.lock();
        let mut patterns: Vec<String> = inner.active.values().cloned().collect();
        patterns.sort();
        patterns
    }

    /// Every pattern passed to subscribe, in call order.
    pub fn subscribe_calls(&self) -> Vec<String> {
        self.inner.lock().subscribe_calls.clone()
    }

    /// Every pattern released, in call order.
    pub fn unsubscribe_calls(&self) -> Vec<String> {
        self.inner.lock().unsubscribe_calls.clone()
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryTransport {
    fn connect(&self) -> ConnectionStatus {
        self.set_status(ConnectionStatus::Connected);
        ConnectionStatus::Connected
    }

    fn status(&self) -> ConnectionStatus {
        self.inner.lock().status.clone()
    }

    fn watch_status(&self) -> Receiver<ConnectionStatus> {
        let (sender, receiver) = bounded(STATUS_BUFFER);
        self.inner.lock().status_watchers.push(sender);
        receiver
    }

    fn subscribe(&self, pattern: &str) -> Result<TransportSubscription> {
        let mut inner = self.inner.lock();
        if inner.status != ConnectionStatus::Connected {
            return Err(FeedError::TransportUnavailable);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        inner.active.insert(id, pattern.to_string());
        inner.subscribe_calls.push(pattern.to_string());

        Ok(TransportSubscription {
            id,
            pattern: pattern.to_string(),
        })
    }

    fn unsubscribe(&self, sub: &TransportSubscription) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.status != ConnectionStatus::Connected {
            return Err(FeedError::TransportUnavailable);
        }

        inner.active.remove(&sub.id);
        inner.unsubscribe_calls.push(sub.pattern.clone());
        Ok(())
    }
}
