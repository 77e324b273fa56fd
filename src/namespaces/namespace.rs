//! One isolated viewer: registry, window, pause flag, pagination cursor.

use crate::error::{FeedError, Result};
use crate::subscriptions::SubscriptionRegistry;
use crate::transport::Transport;
use crate::types::{Message, MessageId, NamespaceConfig, Payload, Subscription, Timestamp};
use crate::view::{self, Page};
use crate::watch::{WatchHandle, WatcherId, Watchers, WindowEvent, DEFAULT_WATCH_BUFFER};
use crate::window::MessageWindow;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared mutable state, serialized under one lock so window order is
/// deterministic when the transport delivers concurrently with reads.
struct NamespaceState {
    paused: bool,
    torn_down: bool,
    current_page: usize,
    window: MessageWindow,
    registry: SubscriptionRegistry,
}

/// An isolated subscription/window instance, identified by key.
///
/// All operations are synchronous and non-blocking; the ingestion path
/// never performs I/O. Once torn down, writes become no-ops and reads
/// return empty results.
pub struct Namespace {
    key: String,
    config: NamespaceConfig,
    /// Process-wide message id counter, shared across namespaces.
    next_message_id: Arc<AtomicU64>,
    inner: Mutex<NamespaceState>,
    watchers: Watchers,
}

impl Namespace {
    pub(crate) fn new(
        key: &str,
        config: NamespaceConfig,
        transport: Arc<dyn Transport>,
        next_message_id: Arc<AtomicU64>,
    ) -> Self {
        let mut registry = SubscriptionRegistry::new(transport);
        for pattern in &config.initial_patterns {
            if let Err(err) = registry.add(pattern) {
                // Degrade to a visible "not subscribed" entry instead of
                // failing namespace creation.
                tracing::warn!(
                    namespace = %key,
                    pattern = %pattern,
                    error = %err,
                    "initial subscribe failed; registering inactive"
                );
                registry.add_inactive(pattern);
            }
        }

        Self {
            key: key.to_string(),
            next_message_id,
            inner: Mutex::new(NamespaceState {
                paused: config.start_paused,
                torn_down: false,
                current_page: 1,
                window: MessageWindow::new(config.capacity),
                registry,
            }),
            watchers: Watchers::new(),
            config,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn config(&self) -> &NamespaceConfig {
        &self.config
    }

    // --- Ingestion ---

    /// Process one inbound delivery from the transport.
    ///
    /// Paused namespaces discard outright: no buffering, no counting, no
    /// notification. Pause is a hard stop for memory and CPU, not a
    /// queue-and-replay mechanism. Unmatched subjects are likewise
    /// discarded; a decode failure is retained as a malformed message so
    /// bad traffic stays visible.
    pub fn ingest(&self, subject: &str, raw_payload: &[u8]) {
        let event = {
            let mut state = self.inner.lock();
            if state.torn_down || state.paused {
                return;
            }
            if state.registry.match_all(subject).is_empty() {
                return;
            }

            let id = MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst));
            state.window.append(Message {
                id,
                topic: subject.to_string(),
                payload: Payload::decode(raw_payload),
                received_at: Timestamp::now(),
                size_bytes: raw_payload.len(),
            });

            WindowEvent::Appended {
                id,
                topic: subject.to_string(),
            }
        };

        // Notify outside the state lock; watchers are bounded and never
        // block the delivery path.
        self.watchers.broadcast(event);
    }

    // --- Subscriptions ---

    /// Register a pattern and issue the transport subscribe.
    pub fn subscribe(&self, pattern: &str) -> Result<Subscription> {
        let mut state = self.inner.lock();
        if state.torn_down {
            return Err(FeedError::UnknownNamespace(self.key.clone()));
        }
        state.registry.add(pattern)
    }

    /// Release a pattern's transport subscription, keeping it visible as
    /// inactive. Returns false if the pattern was never registered.
    pub fn unsubscribe(&self, pattern: &str) -> Result<bool> {
        let mut state = self.inner.lock();
        if state.torn_down {
            return Err(FeedError::UnknownNamespace(self.key.clone()));
        }
        state.registry.remove(pattern)
    }

    /// Snapshot of all registered subscriptions, inactive included.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        let state = self.inner.lock();
        if state.torn_down {
            return Vec::new();
        }
        state.registry.list()
    }

    // --- Window reads ---

    /// All retained messages, oldest first.
    pub fn snapshot(&self) -> Vec<Message> {
        let state = self.inner.lock();
        if state.torn_down {
            return Vec::new();
        }
        state.window.snapshot()
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.inner.lock().window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().window.is_empty()
    }

    /// The requested page, computed fresh from the current window.
    /// Out-of-range indices yield an empty page with correct totals.
    pub fn page(&self, page_size: usize, page_index: usize) -> Page {
        view::page(self.snapshot(), page_size, page_index)
    }

    /// The page at the stored cursor, using the configured page size.
    pub fn current_view(&self) -> Page {
        let (snapshot, current_page) = {
            let state = self.inner.lock();
            if state.torn_down {
                return Page::empty(1);
            }
            (state.window.snapshot(), state.current_page)
        };
        view::page(snapshot, self.config.page_size, current_page)
    }

    /// Move the pagination cursor. Indices are 1-based; 0 clamps to 1.
    pub fn set_page(&self, page_index: usize) {
        self.inner.lock().current_page = page_index.max(1);
    }

    pub fn current_page(&self) -> usize {
        self.inner.lock().current_page
    }

    // --- Pause / clear ---

    /// Flip the pause flag, returning the new state. Nothing discarded
    /// while paused is replayed on resume.
    pub fn toggle_pause(&self) -> bool {
        let mut state = self.inner.lock();
        if !state.torn_down {
            state.paused = !state.paused;
        }
        state.paused
    }

    pub fn is_paused(&self) -> bool {
        self.inner.lock().paused
    }

    /// Drop all retained messages. Subscriptions and pause state are
    /// untouched.
    pub fn clear(&self) {
        {
            let mut state = self.inner.lock();
            if state.torn_down {
                return;
            }
            state.window.clear();
        }
        self.watchers.broadcast(WindowEvent::Cleared);
    }

    // --- Notification ---

    /// Register a watcher notified after every successful append.
    pub fn watch(&self) -> WatchHandle {
        self.watchers.register(DEFAULT_WATCH_BUFFER)
    }

    /// Register a watcher with an explicit buffer size. Watchers whose
    /// buffers overflow are dropped rather than blocking ingestion.
    pub fn watch_with_buffer(&self, buffer: usize) -> WatchHandle {
        self.watchers.register(buffer)
    }

    /// Remove a watcher registered with [`watch`](Self::watch).
    pub fn unwatch(&self, id: WatcherId) {
        self.watchers.unregister(id);
    }

    /// Number of registered watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.count()
    }

    // --- Lifecycle ---

    /// Release all transport subscriptions, clear the window, and mark
    /// the namespace terminal. Idempotent; unsubscribe failures never
    /// block completion.
    pub(crate) fn teardown(&self) {
        {
            let mut state = self.inner.lock();
            if state.torn_down {
                return;
            }
            state.registry.release_all();
            state.window.clear();
            state.torn_down = true;
        }
        tracing::debug!(namespace = %self.key, "namespace torn down");
        self.watchers.broadcast(WindowEvent::TornDown);
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.lock().torn_down
    }
}
