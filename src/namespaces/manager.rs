//! Feed manager: owns the namespace table and the shared transport.

use crate::error::{FeedError, Result};
use crate::transport::Transport;
use crate::types::{NamespaceConfig, Subscription};
use crate::view::Page;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use super::Namespace;

/// Multiplexes transport deliveries across isolated namespaces.
///
/// The transport is constructed by the host and injected here, shared by
/// all namespaces, and torn down at process shutdown; the manager itself
/// never connects or reconnects.
pub struct FeedManager {
    transport: Arc<dyn Transport>,
    namespaces: RwLock<HashMap<String, Arc<Namespace>>>,
    /// Process-wide message id counter; ids are never reused.
    next_message_id: Arc<AtomicU64>,
}

impl FeedManager {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            namespaces: RwLock::new(HashMap::new()),
            next_message_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The shared transport, for hosts that need to drive connect or
    /// watch connection status.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    // --- Lifecycle ---

    /// Get the namespace for `key`, creating it on first access.
    ///
    /// An existing key returns the live namespace and ignores `config`.
    /// Invalid configuration is rejected before any state is created.
    pub fn get_or_create(&self, key: &str, config: NamespaceConfig) -> Result<Arc<Namespace>> {
        if let Some(ns) = self.namespaces.read().get(key) {
            return Ok(Arc::clone(ns));
        }

        if config.capacity == 0 {
            return Err(FeedError::InvalidConfiguration(
                "capacity must be positive".to_string(),
            ));
        }
        if config.page_size == 0 {
            return Err(FeedError::InvalidConfiguration(
                "page size must be positive".to_string(),
            ));
        }

        let mut namespaces = self.namespaces.write();
        // Re-check under the write lock: another caller may have created
        // the namespace between the read and write sections.
        if let Some(ns) = namespaces.get(key) {
            return Ok(Arc::clone(ns));
        }

        let namespace = Arc::new(Namespace::new(
            key,
            config,
            Arc::clone(&self.transport),
            Arc::clone(&self.next_message_id),
        ));
        namespaces.insert(key.to_string(), Arc::clone(&namespace));
        tracing::debug!(namespace = %key, "namespace created");
        Ok(namespace)
    }

    /// Look up a live namespace without creating one.
    pub fn get(&self, key: &str) -> Option<Arc<Namespace>> {
        self.namespaces.read().get(key).cloned()
    }

    /// Release the namespace's subscriptions, clear its window, and
    /// remove it from the table. Idempotent: unknown or already-torn-down
    /// keys are a no-op. A later `get_or_create` with the same key makes
    /// a fresh namespace, not a resurrection.
    pub fn teardown(&self, key: &str) {
        let removed = self.namespaces.write().remove(key);
        if let Some(ns) = removed {
            ns.teardown();
        }
    }

    /// Tear down every live namespace (process shutdown).
    pub fn shutdown(&self) {
        let drained: Vec<Arc<Namespace>> = self.namespaces.write().drain().map(|(_, ns)| ns).collect();
        for ns in drained {
            ns.teardown();
        }
    }

    // --- Key-based conveniences ---

    /// Flip a namespace's pause flag, returning the new state.
    pub fn toggle_pause(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            Some(ns) => Ok(ns.toggle_pause()),
            None => Err(FeedError::UnknownNamespace(key.to_string())),
        }
    }

    /// Page a namespace's window. Unknown keys yield an empty page with
    /// zero total pages rather than an error.
    pub fn page(&self, key: &str, page_size: usize, page_index: usize) -> Page {
        match self.get(key) {
            Some(ns) => ns.page(page_size, page_index),
            None => Page::empty(page_index),
        }
    }

    /// List a namespace's subscriptions. Unknown keys yield an empty list.
    pub fn subscriptions(&self, key: &str) -> Vec<Subscription> {
        match self.get(key) {
            Some(ns) => ns.subscriptions(),
            None => Vec::new(),
        }
    }

    /// Clear a namespace's window. Unknown keys are a no-op.
    pub fn clear(&self, key: &str) {
        if let Some(ns) = self.get(key) {
            ns.clear();
        }
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.read().len()
    }

    // --- Ingestion ---

    /// Transport delivery entry point: fan one inbound message out to
    /// every live namespace. Each namespace filters against its own
    /// registry, so a subject nobody asked for is simply discarded.
    pub fn dispatch(&self, subject: &str, raw_payload: &[u8]) {
        let namespaces: Vec<Arc<Namespace>> =
            self.namespaces.read().values().cloned().collect();
        for ns in namespaces {
            ns.ingest(subject, raw_payload);
        }
    }
}
