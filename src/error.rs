//! Error types for the live feed.

use thiserror::Error;

/// Main error type for feed operations.
///
/// Decode failures are deliberately absent: a payload that fails structured
/// decode is recorded on the message itself (see [`crate::types::Payload`])
/// so malformed traffic stays visible instead of interrupting ingestion.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transport unavailable (not connected)")]
    TransportUnavailable,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
