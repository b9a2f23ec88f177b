//! Transport error type and its classification for logging.

use std::io;

use thiserror::Error;

/// Failure during one request/response exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Host did not resolve or no address accepted the connection.
    #[error("connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    /// Connect or read exceeded the configured timeout.
    #[error("timed out: {0}")]
    Timeout(#[source] io::Error),
    /// Any other I/O error while writing the request or reading the response.
    #[error("i/o: {0}")]
    Io(#[source] io::Error),
    /// Header block grew past the configured limit before the blank line.
    #[error("response headers exceed {limit} bytes")]
    HeadersTooLarge { limit: usize },
    /// Body grew past the configured limit before end-of-stream.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Coarse classification of a [`TransportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (refused, reset, DNS, etc.).
    Connection,
    /// A configured size limit was hit.
    Limit,
    /// Anything else.
    Other,
}

impl TransportError {
    /// Wraps an I/O error, routing timeouts to [`TransportError::Timeout`].
    pub(crate) fn from_io(e: io::Error) -> Self {
        if is_timeout(&e) {
            TransportError::Timeout(e)
        } else {
            TransportError::Io(e)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Connect { source, .. } if is_timeout(source) => ErrorKind::Timeout,
            TransportError::Connect { .. } => ErrorKind::Connection,
            TransportError::Timeout(_) => ErrorKind::Timeout,
            TransportError::Io(e) => classify_io_error(e),
            TransportError::HeadersTooLarge { .. } | TransportError::BodyTooLarge { .. } => {
                ErrorKind::Limit
            }
        }
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

/// Classify a raw I/O error.
pub fn classify_io_error(e: &io::Error) -> ErrorKind {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => ErrorKind::Timeout,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof
        | io::ErrorKind::AddrNotAvailable => ErrorKind::Connection,
        _ => ErrorKind::Other,
    }
}
