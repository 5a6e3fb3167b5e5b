//! Typed errors for the fetch path and configuration.

use thiserror::Error;

/// High-level classification of a fetch failure, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or transfer timeout.
    Timeout,
    /// Network-level failure (connection refused, DNS, reset).
    Connection,
    /// Server answered with a status the strategy cannot use.
    Status,
    /// Anything else (bad URL, TLS, content decoding).
    Other,
}

/// Error returned by a tail fetch. Every variant is terminal for the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("network error: {0}")]
    Network(#[from] curl::Error),
    /// HTTP status other than 200 or 206.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u32),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Network(e) => classify_curl_error(e),
            FetchError::UnexpectedStatus(_) => ErrorKind::Status,
        }
    }
}

/// Classify a curl error for reporting.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid feed URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}
