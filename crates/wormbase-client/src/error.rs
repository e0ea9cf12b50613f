//! Client error types.

use thiserror::Error;

/// Errors raised by the WormBase client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {url}")]
    Http { status: u16, url: String },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
