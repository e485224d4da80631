//! Closed error taxonomy for a single fetch, and libcurl error classification.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure category of a fetch. Categories are mutually exclusive and are
/// checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Output directory could not be created.
    Directory,
    /// Server answered 4xx or 5xx.
    HttpStatus,
    /// Host could not be reached (DNS, refused, unreachable, TLS handshake, dropped link).
    Connection,
    /// Connect or total time budget exceeded.
    Timeout,
    /// Any other request-layer failure (bad scheme, malformed URL, redirect loop).
    Request,
    /// Anything else, e.g. the disk failing while the body is written.
    Unexpected,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Directory => "DirectoryError",
            ErrorCategory::HttpStatus => "HttpStatusError",
            ErrorCategory::Connection => "ConnectionError",
            ErrorCategory::Timeout => "TimeoutError",
            ErrorCategory::Request => "RequestError",
            ErrorCategory::Unexpected => "UnexpectedError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a fetch failed. Every variant maps to exactly one [`ErrorCategory`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not create output directory {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("HTTP error {status} for url: {url}")]
    HttpStatus { url: String, status: u32 },

    #[error("connection failed: {0}")]
    Connection(#[source] curl::Error),

    #[error("request timed out: {0}")]
    Timeout(#[source] curl::Error),

    #[error("request failed: {0}")]
    Request(#[source] curl::Error),

    #[error("unsupported URL scheme '{scheme}' (only http and https are fetched)")]
    UnsupportedScheme { scheme: String },

    #[error("{context}: {source}")]
    Unexpected {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::Directory { .. } => ErrorCategory::Directory,
            FetchError::HttpStatus { .. } => ErrorCategory::HttpStatus,
            FetchError::Connection(_) => ErrorCategory::Connection,
            FetchError::Timeout(_) => ErrorCategory::Timeout,
            FetchError::Request(_) | FetchError::UnsupportedScheme { .. } => {
                ErrorCategory::Request
            }
            FetchError::Unexpected { .. } => ErrorCategory::Unexpected,
        }
    }

    /// HTTP status carried by an [`ErrorCategory::HttpStatus`] failure.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        match classify_curl_error(&e) {
            ErrorCategory::Connection => FetchError::Connection(e),
            ErrorCategory::Timeout => FetchError::Timeout(e),
            ErrorCategory::Unexpected => FetchError::Unexpected {
                context: "transfer aborted".to_string(),
                source: io::Error::new(io::ErrorKind::Other, e),
            },
            _ => FetchError::Request(e),
        }
    }
}

/// Classify a libcurl error into a failure category.
///
/// Never returns [`ErrorCategory::Directory`] or [`ErrorCategory::HttpStatus`];
/// those are decided from the filesystem and the response code.
pub fn classify_curl_error(e: &curl::Error) -> ErrorCategory {
    if e.is_operation_timedout() {
        return ErrorCategory::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
    {
        return ErrorCategory::Connection;
    }
    if e.is_write_error() {
        return ErrorCategory::Unexpected;
    }
    ErrorCategory::Request
}
