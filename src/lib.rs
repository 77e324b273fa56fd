//! # Live Feed
//!
//! A real-time topic subscription and message-window manager: the engine
//! behind a live message viewer. It ingests a continuous stream of
//! pub/sub deliveries, multiplexes topic subscriptions, bounds memory
//! with a fixed-capacity window, and exposes a paginated, pausable view
//! to any number of isolated consumers ("namespaces").
//!
//! ## Core Concepts
//!
//! - **Namespaces**: Isolated viewer instances, each with its own
//!   subscriptions, window, pause flag, and pagination cursor
//! - **Window**: Bounded most-recent-N buffer with oldest-first eviction
//! - **Patterns**: Dot-delimited topics with `*` (one token) and a
//!   trailing `>` (one or more tokens) wildcards
//! - **Watch**: Bounded change notifications fired after every append
//!
//! ## Example
//!
//! ```ignore
//! use livefeed::{FeedManager, MemoryTransport, NamespaceConfig};
//! use std::sync::Arc;
//!
//! let manager = FeedManager::new(Arc::new(MemoryTransport::connected()));
//!
//! let viewer = manager.get_or_create("default", NamespaceConfig {
//!     start_paused: false,
//!     initial_patterns: vec!["sensors.>".to_string()],
//!     ..Default::default()
//! })?;
//!
//! // Transport glue delivers inbound messages here:
//! manager.dispatch("sensors.room1.temperature", br#"{"celsius": 21.5}"#);
//!
//! let page = viewer.page(25, 1);
//! println!("{} messages, {} pages", page.items.len(), page.total_pages);
//! ```

pub mod error;
pub mod matcher;
pub mod namespaces;
pub mod subscriptions;
pub mod transport;
pub mod types;
pub mod view;
pub mod watch;
pub mod window;

// Re-exports
pub use error::{FeedError, Result};
pub use namespaces::{FeedManager, Namespace};
pub use subscriptions::SubscriptionRegistry;
pub use transport::{ConnectionStatus, MemoryTransport, Transport, TransportSubscription};
pub use types::{
    Message, MessageId, NamespaceConfig, Payload, Subscription, Timestamp, DEFAULT_CAPACITY,
    DEFAULT_PAGE_SIZE,
};
pub use view::Page;
pub use watch::{WatchHandle, WatcherId, WindowEvent, DEFAULT_WATCH_BUFFER};
pub use window::MessageWindow;
