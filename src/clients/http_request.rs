//! HTTP request types.
//!
//! This module provides [`HttpMethod`], the per-verb [`RequestOptions`], the
//! generic [`RequestConfig`] consumed by `request()`, and [`RequestParts`],
//! the `{url, headers}` pair that request interceptors transform.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::clients::errors::UnsupportedMethodError;

/// HTTP methods recognised by the facade.
///
/// `request()` dispatches only the five verbs that have a verb operation
/// (`get`, `post`, `put`, `delete`, `patch`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
    /// HTTP PUT method.
    Put,
    /// HTTP DELETE method.
    Delete,
    /// HTTP PATCH method.
    Patch,
    /// HTTP HEAD method.
    Head,
    /// HTTP OPTIONS method.
    Options,
}

impl HttpMethod {
    /// Returns the lowercase method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Returns `true` if the verb operation for this method takes a body.
    #[must_use]
    pub const fn accepts_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
            Self::Patch => reqwest::Method::PATCH,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = UnsupportedMethodError;

    /// Parses a method name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "delete" => Ok(Self::Delete),
            "patch" => Ok(Self::Patch),
            "head" => Ok(Self::Head),
            "options" => Ok(Self::Options),
            _ => Err(UnsupportedMethodError::new(s)),
        }
    }
}

/// The mutable subset of a request that request interceptors see.
///
/// `url` is the URL the caller passed, without the encoded query string,
/// and `headers` already has the default headers merged in. Interceptors
/// may only change what is dispatched through `headers`; a rewritten `url`
/// is not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParts {
    /// The request URL as passed by the caller.
    pub url: String,
    /// The headers the request will be dispatched with.
    pub headers: HashMap<String, String>,
}

impl RequestParts {
    /// Creates request parts from a URL and headers.
    #[must_use]
    pub fn new(url: impl Into<String>, headers: HashMap<String, String>) -> Self {
        Self {
            url: url.into(),
            headers,
        }
    }
}

/// Per-call options for the verb operations.
///
/// # Example
///
/// ```rust
/// use brex_axios::RequestOptions;
///
/// let options = RequestOptions::builder()
///     .header("Authorization", "Bearer token")
///     .param("page", 2)
///     .param("published", true)
///     .build();
///
/// assert_eq!(options.params.unwrap().get("page"), Some(&"2".to_string()));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Headers for this call; they override default headers on key collision.
    pub headers: Option<HashMap<String, String>>,
    /// Query parameters, already stringified.
    pub params: Option<BTreeMap<String, String>>,
}

impl RequestOptions {
    /// Creates a new builder for constructing `RequestOptions`.
    #[must_use]
    pub fn builder() -> RequestOptionsBuilder {
        RequestOptionsBuilder::default()
    }
}

/// Builder for [`RequestOptions`].
#[derive(Debug, Default)]
pub struct RequestOptionsBuilder {
    headers: Option<HashMap<String, String>>,
    params: Option<BTreeMap<String, String>>,
}

impl RequestOptionsBuilder {
    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds a single query parameter, stringifying its value.
    ///
    /// A repeated key replaces the earlier value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.params
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.to_string());
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = Some(params);
        self
    }

    /// Builds the [`RequestOptions`].
    #[must_use]
    pub fn build(self) -> RequestOptions {
        RequestOptions {
            headers: self.headers,
            params: self.params,
        }
    }
}

/// Configuration for the generic `request()` operation.
///
/// `method` is kept as the caller's string so that unknown methods can be
/// reported verbatim; it defaults to GET and is matched case-insensitively.
///
/// # Example
///
/// ```rust
/// use brex_axios::{HttpMethod, RequestConfig};
/// use serde_json::json;
///
/// let config = RequestConfig::builder("/posts")
///     .method(HttpMethod::Post)
///     .data(json!({"title": "hello"}))
///     .build();
///
/// assert_eq!(config.method.as_deref(), Some("post"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestConfig {
    /// The request URL (relative to the base URL, or absolute).
    pub url: String,
    /// The method name; `None` means GET.
    pub method: Option<String>,
    /// Headers for this call.
    pub headers: Option<HashMap<String, String>>,
    /// Query parameters, already stringified.
    pub params: Option<BTreeMap<String, String>>,
    /// The request body, used by POST, PUT and PATCH.
    pub data: Option<serde_json::Value>,
}

impl RequestConfig {
    /// Creates a new builder for the given URL.
    #[must_use]
    pub fn builder(url: impl Into<String>) -> RequestConfigBuilder {
        RequestConfigBuilder::new(url)
    }

    /// Resolves the method, defaulting to GET.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedMethodError`] if the method is not recognised.
    pub fn resolve_method(&self) -> Result<HttpMethod, UnsupportedMethodError> {
        self.method.as_deref().map_or(Ok(HttpMethod::Get), str::parse)
    }
}

/// Builder for [`RequestConfig`].
#[derive(Debug)]
pub struct RequestConfigBuilder {
    config: RequestConfig,
}

impl RequestConfigBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            config: RequestConfig {
                url: url.into(),
                ..RequestConfig::default()
            },
        }
    }

    /// Sets the method; accepts an [`HttpMethod`] or any method name.
    #[must_use]
    pub fn method(mut self, method: impl fmt::Display) -> Self {
        self.config.method = Some(method.to_string());
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets all headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.config.headers = Some(headers);
        self
    }

    /// Adds a single query parameter, stringifying its value.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.config
            .params
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.to_string());
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn data(mut self, data: impl Into<serde_json::Value>) -> Self {
        self.config.data = Some(data.into());
        self
    }

    /// Builds the [`RequestConfig`].
    #[must_use]
    pub fn build(self) -> RequestConfig {
        self.config
    }
}
