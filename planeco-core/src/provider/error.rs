use thiserror::Error;

/// Errors from routing provider calls.
///
/// Every HTTP, status or decoding failure from the matrix, geometry and
/// duration calls maps onto one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No waypoints were provided.
    ///
    /// Callers should never issue a request for an empty stop list.
    #[error("at least one waypoint is required")]
    EmptyInput,
    /// The request did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The backend answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP status {status}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },
    /// The request failed before a response was received.
    #[error("request to {url} failed: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Error detail.
        message: String,
    },
    /// The backend answered but reported a failure status in its payload.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Backend status code (e.g. `"InvalidQuery"`).
        code: String,
        /// Backend message, empty when none was supplied.
        message: String,
    },
    /// The response body could not be decoded or was incomplete.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Error detail.
        message: String,
    },
}
