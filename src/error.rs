//! Error types shared across the server.

use thiserror::Error;

/// Failure to turn buffered bytes into a [`Request`](crate::http::request::Request).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer does not yet hold a complete request.
    #[error("incomplete request")]
    Incomplete,
    /// The request line is not `METHOD URI VERSION`.
    #[error("malformed request line: {0:?}")]
    InvalidRequestLine(String),
    /// The request head is not valid UTF-8.
    #[error("request is not valid UTF-8")]
    InvalidEncoding,
}

/// Fatal conditions raised before the server accepts any connection.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid port {0}: expected a number between 1024 and 65534")]
    InvalidPort(String),
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
