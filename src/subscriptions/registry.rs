//! Registry of topic patterns for one namespace.

use crate::error::Result;
use crate::matcher;
use crate::transport::{Transport, TransportSubscription};
use crate::types::Subscription;
use std::sync::Arc;

/// Internal registry entry.
struct Entry {
    pattern: String,
    active: bool,
    message_count: u64,
    /// Transport-level handle, held while active.
    handle: Option<TransportSubscription>,
}

impl Entry {
    fn snapshot(&self) -> Subscription {
        Subscription {
            pattern: self.pattern.clone(),
            active: self.active,
            message_count: self.message_count,
        }
    }
}

/// Tracks desired topic patterns for one namespace.
///
/// Not internally synchronized: the owning namespace serializes access
/// under its own lock.
pub struct SubscriptionRegistry {
    transport: Arc<dyn Transport>,
    entries: Vec<Entry>,
}

impl SubscriptionRegistry {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            entries: Vec::new(),
        }
    }

    /// Register a pattern and issue the transport subscribe.
    ///
    /// Idempotent: an already-active pattern returns its existing entry
    /// without a second transport call. Re-adding an inactive pattern
    /// re-issues the subscribe and reactivates it, keeping its count.
    /// A transport failure leaves the registry unmodified.
    pub fn add(&mut self, pattern: &str) -> Result<Subscription> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.pattern == pattern) {
            if entry.active {
                return Ok(entry.snapshot());
            }
            let handle = self.transport.subscribe(pattern)?;
            entry.handle = Some(handle);
            entry.active = true;
            return Ok(entry.snapshot());
        }

        let handle = self.transport.subscribe(pattern)?;
        let entry = Entry {
            pattern: pattern.to_string(),
            active: true,
            message_count: 0,
            handle: Some(handle),
        };
        let snapshot = entry.snapshot();
        self.entries.push(entry);
        Ok(snapshot)
    }

    /// Register a pattern without a transport subscribe, leaving it
    /// inactive. Used when pre-registering patterns while the transport
    /// is unavailable: the pattern stays visible as "not subscribed".
    pub(crate) fn add_inactive(&mut self, pattern: &str) {
        if self.entries.iter().any(|e| e.pattern == pattern) {
            return;
        }
        self.entries.push(Entry {
            pattern: pattern.to_string(),
            active: false,
            message_count: 0,
            handle: None,
        });
    }

    /// Release a pattern's transport subscription and mark it inactive.
    /// The entry stays registered (visible to the UI). Returns false if
    /// the pattern was never registered.
    pub fn remove(&mut self, pattern: &str) -> Result<bool> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.pattern == pattern) else {
            return Ok(false);
        };

        if let Some(handle) = &entry.handle {
            self.transport.unsubscribe(handle)?;
        }
        entry.handle = None;
        entry.active = false;
        Ok(true)
    }

    /// Every active subscription matching `subject`, incrementing each
    /// matched entry's message count.
    pub fn match_all(&mut self, subject: &str) -> Vec<Subscription> {
        let mut matched = Vec::new();
        for entry in &mut self.entries {
            if entry.active && matcher::matches(&entry.pattern, subject) {
                entry.message_count += 1;
                matched.push(entry.snapshot());
            }
        }
        matched
    }

    /// Snapshot of all entries, inactive included, in registration order.
    pub fn list(&self) -> Vec<Subscription> {
        self.entries.iter().map(Entry::snapshot).collect()
    }

    /// Release every held transport subscription, marking all entries
    /// inactive. Unsubscribe failures are logged and never block: a
    /// leaked broker-side subscription beats an unresponsive teardown.
    pub(crate) fn release_all(&mut self) {
        for entry in &mut self.entries {
            if let Some(handle) = entry.handle.take() {
                if let Err(err) = self.transport.unsubscribe(&handle) {
                    tracing::warn!(
                        pattern = %entry.pattern,
                        error = %err,
                        "unsubscribe failed during release; continuing"
                    );
                }
            }
            entry.active = false;
        }
    }
}
