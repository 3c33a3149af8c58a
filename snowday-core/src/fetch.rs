//! Failures raised by collaborators that fetch data over the network.
//!
//! A fetch failure is terminal for the prediction that triggered it; the
//! engine never retries.

use thiserror::Error;

/// Errors from [`Geocoder::locate`](crate::Geocoder::locate) and
/// [`ForecastProvider::forecast`](crate::ForecastProvider::forecast).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout applied to the request, in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Description from the HTTP client.
        message: String,
    },
    /// The request failed before a response was received.
    #[error("request to {url} failed: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Description from the HTTP client.
        message: String,
    },
    /// The response body was missing required data or could not be decoded.
    #[error("failed to parse response: {message}")]
    ParseError {
        /// Description of the malformed payload.
        message: String,
    },
}
