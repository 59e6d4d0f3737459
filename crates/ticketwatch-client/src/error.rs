//! Error types for remote communication.

use thiserror::Error;

/// Result type alias using [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the remote control surface.
///
/// Command failures are surfaced to the operator as fixed, action-specific
/// messages; the variants here carry the underlying detail for diagnostics.
/// Poll failures are absorbed at the poller and only ever logged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, DNS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("{action} failed with status {status}")]
    RemoteStatus {
        action: &'static str,
        status: reqwest::StatusCode,
    },

    /// Status body did not have the `"<label>: <integer>"` shape.
    #[error("Malformed status body: {body:?}")]
    MalformedStatus { body: String },
}

impl ClientError {
    /// Returns true for transport-level failures as opposed to remote
    /// rejections or payload problems.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
