//! Bridge error type.

use thiserror::Error;

/// Why an `invoke` failed.
///
/// Most call sites are fire-and-forget and may ignore these; they
/// exist so the ones that do care (history fetches, statistics) can
/// tell transport failures from bad responses.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The request never completed (connection refused, timeout, …).
    #[error("bridge transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("bridge action '{action}' returned HTTP {status}")]
    Status {
        /// Invoked action name.
        action: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("bridge action '{action}' returned malformed JSON: {detail}")]
    MalformedResponse {
        /// Invoked action name.
        action: String,
        /// Parser detail.
        detail: String,
    },
}
