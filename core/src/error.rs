//! Error types for the management API client.
//!
//! # Design
//! Every failure is returned to the immediate caller; nothing is retried or
//! recovered locally. The variants separate the stages a call can fail at:
//! reaching the server (`Transport`), the server rejecting the request
//! (`HttpError`), the server answering with something the client cannot read
//! (`DeserializationError`), and the caller's value not encoding
//! (`SerializationError`).

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the dispatcher and every resource method.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure: unreachable host, TLS, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 2xx response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The client configuration is unusable (bad base URL, bad env value).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-supplied identifier cannot be placed in a request path.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// HTTP status carried by an `HttpError`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
