//! Typed errors for the search transports.
//!
//! Only transport-level failures surface here; per-line decode failures
//! live in [`crate::record::DecodeError`] and never escalate past the
//! stream controller's loop.

use thiserror::Error;

/// Fatal failure of one search attempt. No automatic retry is performed.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Connection or mid-stream network failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered, but not with a success status.
    #[error("search endpoint {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}
