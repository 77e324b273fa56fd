//! Namespace lifecycle and message ingestion.
//!
//! A namespace is the unit of isolation: one registry, one bounded
//! window, one pause flag, and one pagination cursor per key. The
//! [`FeedManager`] owns the table of live namespaces and fans transport
//! deliveries out to them; namespaces never share state, so concurrent
//! viewers cannot interfere with each other.

mod manager;
mod namespace;

pub use manager::FeedManager;
pub use namespace::Namespace;
