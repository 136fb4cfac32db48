//! HTTP-specific error types.
//!
//! This module contains the errors a call can settle with once it has
//! entered the request pipeline.
//!
//! # Error Handling
//!
//! - [`UpstreamError`]: The transport reported an error envelope
//! - [`UnsupportedMethodError`]: `request()` was given a method with no verb operation
//! - [`InterceptorError`]: A caller-supplied interceptor failed
//! - [`HttpError`]: Unified error type encompassing all of the above
//!
//! # Example
//!
//! ```rust,ignore
//! use brex_axios::{AxiosStyleClient, HttpError};
//!
//! match client.get::<serde_json::Value>("/posts/1", None).await {
//!     Ok(response) => println!("Post: {}", response.data),
//!     Err(HttpError::Upstream(e)) => println!("API error {}: {}", e.status, e.message),
//!     Err(HttpError::UnsupportedMethod(e)) => println!("{e}"),
//!     Err(HttpError::Interceptor(e)) => println!("Interceptor failed: {e}"),
//!     Err(HttpError::Decode(e)) => println!("Unexpected payload: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Error returned when the transport reports an `error` envelope.
///
/// The message is forwarded verbatim from the envelope.
///
/// # Example
///
/// ```rust
/// use brex_axios::clients::UpstreamError;
///
/// let error = UpstreamError::new("boom");
/// assert_eq!(error.to_string(), "boom");
/// assert_eq!(error.status, 0);
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct UpstreamError {
    /// The message carried by the error envelope.
    pub message: String,
    /// The HTTP status code reported alongside the error.
    pub status: u16,
    /// Response headers reported alongside the error.
    pub headers: HashMap<String, String>,
    /// Extra error details (for the reqwest transport, the parsed response body).
    pub details: Option<serde_json::Value>,
}

impl UpstreamError {
    /// Creates an upstream error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 0,
            headers: HashMap::new(),
            details: None,
        }
    }
}

/// Error returned when `request()` is given a method it cannot dispatch.
///
/// The method is reported lowercased.
///
/// # Example
///
/// ```rust
/// use brex_axios::clients::UnsupportedMethodError;
///
/// let error = UnsupportedMethodError::new("FOO");
/// assert_eq!(error.to_string(), "Unsupported method: foo");
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unsupported method: {method}")]
pub struct UnsupportedMethodError {
    /// The offending method, lowercased.
    pub method: String,
}

impl UnsupportedMethodError {
    /// Creates the error for the given method string.
    #[must_use]
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_lowercase(),
        }
    }
}

/// Error raised by a caller-supplied interceptor or handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InterceptorError {
    /// Description of the failure.
    pub message: String,
}

impl InterceptorError {
    /// Creates an interceptor error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unified error type for everything a call can fail with.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport reported an error envelope.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The requested method has no verb operation.
    #[error(transparent)]
    UnsupportedMethod(#[from] UnsupportedMethodError),

    /// A request interceptor, success handler, or error handler failed.
    #[error(transparent)]
    Interceptor(#[from] InterceptorError),

    /// The response payload could not be decoded into the requested type.
    #[error("Failed to decode response data: {0}")]
    Decode(#[from] serde_json::Error),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream(e) if e.status != 0 => Some(e.status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
