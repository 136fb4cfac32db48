//! Configuration types for the client facades.
//!
//! This module provides the configuration consumed by the underlying
//! transport plus the one adapter-specific setting, `throw_on_error`.
//!
//! # Overview
//!
//! - [`ClientConfig`]: The configuration struct
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`BaseUrl`]: A validated base URL newtype
//!
//! # Example
//!
//! ```rust
//! use brex_axios::{BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap())
//!     .header("X-Client", "docs")
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.throw_on_error());
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for the transport and the facades built on top of it.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: BaseUrl,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    throw_on_error: bool,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the base URL relative request paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers the transport sends with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns whether the simple facade turns error envelopes into errors.
    #[must_use]
    pub const fn throw_on_error(&self) -> bool {
        self.throw_on_error
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `base_url` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `headers`: Empty
/// - `timeout`: `None` (no timeout)
/// - `user_agent_prefix`: `None`
/// - `throw_on_error`: `false`
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use brex_axios::{BaseUrl, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com").unwrap())
///     .timeout(Duration::from_secs(10))
///     .user_agent_prefix("MyApp/1.0")
///     .throw_on_error(true)
///     .build()
///     .unwrap();
///
/// assert!(config.throw_on_error());
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<BaseUrl>,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    throw_on_error: Option<bool>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Adds a single transport-level header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Replaces all transport-level headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the error policy of the simple facade.
    #[must_use]
    pub const fn throw_on_error(mut self, throw_on_error: bool) -> Self {
        self.throw_on_error = Some(throw_on_error);
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// or [`ConfigError::InvalidHeaderName`] if a configured header name is
    /// not a valid HTTP header name.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        if let Some(name) = self
            .headers
            .keys()
            .find(|name| reqwest::header::HeaderName::from_bytes(name.as_bytes()).is_err())
        {
            return Err(ConfigError::InvalidHeaderName { name: name.clone() });
        }

        Ok(ClientConfig {
            base_url,
            headers: self.headers,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
            throw_on_error: self.throw_on_error.unwrap_or(false),
        })
    }
}
