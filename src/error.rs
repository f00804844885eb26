//! Error types for the `SwitchBot` power client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading credentials or talking to the API
///
/// A non-2xx response from the API is not an error; it is reported as
/// [`crate::client::CommandOutcome::Failure`].
#[derive(Debug, Error)]
pub enum Error {
    /// IO error (unreadable `.env` override file)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error (DNS, connect, timeout)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request signing error
    #[error("signing error: {0}")]
    Signing(String),

    /// A header value could not be encoded for the wire
    #[error("invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}
