//! Core types for the live feed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default message window capacity.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default page size for the pagination view.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Unique identifier for a received message.
///
/// Assigned at ingestion time from a process-wide monotonic counter,
/// never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Microseconds since Unix epoch.
///
/// Assigned by the ingestion path at arrival, not by the transport, so
/// window ordering stays consistent even when transport timestamps skew.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_micros() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Decoded message payload.
///
/// Downstream code must handle each case explicitly rather than assuming
/// well-formed JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// Wire bytes decoded successfully as JSON.
    Structured(serde_json::Value),

    /// Bytes kept undecoded (empty payloads land here).
    Raw(Vec<u8>),

    /// Structured decode failed; original bytes retained for display.
    Malformed { bytes: Vec<u8>, reason: String },
}

impl Payload {
    /// Decode wire bytes. Decode failure yields `Malformed`, never an error,
    /// so one bad message cannot interrupt the stream.
    pub fn decode(raw: &[u8]) -> Self {
        if raw.is_empty() {
            return Payload::Raw(Vec::new());
        }
        match serde_json::from_slice(raw) {
            Ok(value) => Payload::Structured(value),
            Err(e) => Payload::Malformed {
                bytes: raw.to_vec(),
                reason: e.to_string(),
            },
        }
    }

    /// Whether this payload failed structured decode.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Payload::Malformed { .. })
    }
}

/// A single received message.
///
/// Immutable after creation: the window only appends and evicts, it never
/// mutates a stored message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier (assigned at ingestion).
    pub id: MessageId,

    /// Exact subject the message arrived on (not the subscribed pattern).
    pub topic: String,

    /// Decoded payload.
    pub payload: Payload,

    /// Arrival time, assigned by the ingestion controller.
    pub received_at: Timestamp,

    /// Size of the original encoded payload in bytes.
    pub size_bytes: usize,
}

/// Snapshot of a registered subscription, for display.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    /// Topic pattern, possibly containing wildcard tokens.
    pub pattern: String,

    /// Whether the transport-level subscribe is currently held.
    /// Inactive subscriptions stay registered and visible.
    pub active: bool,

    /// Cumulative count of matched messages, independent of eviction.
    pub message_count: u64,
}

/// Configuration for a namespace, applied at creation.
#[derive(Clone, Debug)]
pub struct NamespaceConfig {
    /// Message window capacity. Must be positive; immutable after creation.
    pub capacity: usize,

    /// Default page size for the pagination cursor. Must be positive.
    pub page_size: usize,

    /// Whether the namespace starts paused.
    /// Defaults to true to avoid surprising bursts on load.
    pub start_paused: bool,

    /// Topic patterns to pre-register at creation.
    pub initial_patterns: Vec<String>,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            start_paused: true,
            initial_patterns: Vec::new(),
        }
    }
}
