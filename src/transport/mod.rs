//! Transport boundary for the broker client.
//!
//! The feed never talks to a broker directly. Connect, reconnect, and
//! topic subscribe/unsubscribe belong to a [`Transport`] implementation
//! injected at manager construction; inbound deliveries enter through
//! [`crate::FeedManager::dispatch`]. This keeps the feed testable without
//! a live broker.

mod memory;

pub use memory::MemoryTransport;

use crate::error::Result;
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};

/// Connection state of the underlying broker client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error { detail: String },
}

/// Opaque handle to a transport-level subscription, returned by
/// [`Transport::subscribe`] and required to release it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransportSubscription {
    pub id: u64,
    pub pattern: String,
}

/// Broker client operations consumed by the feed.
///
/// Subscribe and unsubscribe are fire-and-forget from the feed's
/// perspective: they may fail fast with
/// [`FeedError::TransportUnavailable`](crate::FeedError::TransportUnavailable)
/// when not connected, but they never block on network I/O.
pub trait Transport: Send + Sync {
    /// Initiate a connection, returning the resulting status.
    fn connect(&self) -> ConnectionStatus;

    /// Current connection status.
    fn status(&self) -> ConnectionStatus;

    /// Stream of status transitions, for a UI to display
    /// disconnected/connecting/connected/error.
    fn watch_status(&self) -> Receiver<ConnectionStatus>;

    /// Issue a broker-level subscribe for a topic pattern.
    fn subscribe(&self, pattern: &str) -> Result<TransportSubscription>;

    /// Release a broker-level subscription.
    fn unsubscribe(&self, sub: &TransportSubscription) -> Result<()>;
}
