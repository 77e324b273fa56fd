//! Per-namespace subscription registry.
//!
//! Tracks the set of desired topic patterns, whether each currently holds
//! a transport-level subscription, and a cumulative matched-message count
//! per pattern. Transport subscribe/unsubscribe failures surface as
//! `TransportUnavailable` without mutating registry state, so the caller
//! can retry once the connection comes back.

mod registry;

pub use registry::SubscriptionRegistry;
