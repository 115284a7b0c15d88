//! Error types for rs-gravity.
//!
//! Extraction itself never fails on malformed markup; the only error a caller
//! sees from the pipeline is a rejected configuration. Image probing has its
//! own error type so a fetcher implementation can report why a probe failed.

use std::time::Duration;

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value was rejected before the pipeline started.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Human readable explanation.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure signal returned by a [`Fetcher`](crate::Fetcher).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The fetch did not complete within the allotted time.
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The remote end answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Connection, DNS or I/O failure.
    #[error("transport error: {0}")]
    Transport(String),
}
