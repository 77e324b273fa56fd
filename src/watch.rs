//! Change notification for window mutations.
//!
//! Consumers register a watcher and receive an event after every
//! successful append, so a UI can re-render without polling. Buffers are
//! bounded and slow watchers are dropped rather than ever blocking the
//! ingestion path.

use crate::types::MessageId;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default watcher buffer size (events).
pub const DEFAULT_WATCH_BUFFER: usize = 1000;

/// Unique identifier for a watcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatcherId(pub u64);

/// Events emitted to watchers of a namespace window.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowEvent {
    /// A message was appended to the window.
    Appended { id: MessageId, topic: String },

    /// The window was cleared.
    Cleared,

    /// The namespace was torn down; no further events will arrive.
    TornDown,
}

/// Handle for receiving window events.
pub struct WatchHandle {
    pub id: WatcherId,
    /// Channel to receive events.
    pub receiver: Receiver<WindowEvent>,
}

impl WatchHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<WindowEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<WindowEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<WindowEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Set of registered watchers for one namespace.
pub(crate) struct Watchers {
    senders: RwLock<HashMap<WatcherId, Sender<WindowEvent>>>,
    next_id: AtomicU64,
}

impl Watchers {
    pub(crate) fn new() -> Self {
        Self {
            senders: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a watcher with the given buffer size.
    pub(crate) fn register(&self, buffer: usize) -> WatchHandle {
        let id = WatcherId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(buffer);
        self.senders.write().insert(id, sender);
        WatchHandle { id, receiver }
    }

    /// Remove a watcher.
    pub(crate) fn unregister(&self, id: WatcherId) {
        self.senders.write().remove(&id);
    }

    /// Broadcast an event. Watchers whose buffers are full are dropped.
    pub(crate) fn broadcast(&self, event: WindowEvent) {
        let mut to_remove = Vec::new();

        {
            let senders = self.senders.read();
            for (id, sender) in senders.iter() {
                if sender.try_send(event.clone()).is_err() {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut senders = self.senders.write();
            for id in to_remove {
                senders.remove(&id);
            }
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.senders.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_broadcast_receive() {
        let watchers = Watchers::new();
        let handle = watchers.register(10);
        assert_eq!(watchers.count(), 1);

        watchers.broadcast(WindowEvent::Appended {
            id: MessageId(1),
            topic: "a.b".to_string(),
        });

        let event = handle.try_recv().unwrap();
        assert!(matches!(event, WindowEvent::Appended { id: MessageId(1), .. }));
    }

    #[test]
    fn test_slow_watcher_dropped() {
        let watchers = Watchers::new();
        let _handle = watchers.register(2);

        for _ in 0..5 {
            watchers.broadcast(WindowEvent::Cleared);
        }

        // Buffer of 2 overflowed on the third event.
        assert_eq!(watchers.count(), 0);
    }

    #[test]
    fn test_unregister() {
        let watchers = Watchers::new();
        let handle = watchers.register(10);
        watchers.unregister(handle.id);
        assert_eq!(watchers.count(), 0);
    }
}
