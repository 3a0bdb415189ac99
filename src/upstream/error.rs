use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by an [`ItemSource`](super::ItemSource).
pub enum UpstreamError {
    /// The request could not be sent or the body could not be read.
    #[error("request to '{url}' failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status.
    #[error("'{url}' returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the expected JSON shape.
    #[error("malformed payload from '{url}': {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Parser message.
        message: String,
    },

    /// The concurrency limiter was shut down.
    #[error("upstream limiter closed")]
    LimiterClosed,
}

/// Result alias for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
