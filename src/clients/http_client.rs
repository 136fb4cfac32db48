//! The reqwest-backed transport.
//!
//! This module provides [`ReqwestTransport`], which executes requests with
//! `reqwest` and reports every HTTP outcome as a
//! [`TransportResult`] envelope.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_response::{TransportError, TransportResult};
use crate::clients::interceptors::BoxFuture;
use crate::clients::transport::{Transport, TransportInterceptor, TransportRequest};
use crate::config::{BaseUrl, ClientConfig};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transport that executes requests with `reqwest`.
///
/// The transport handles:
/// - Resolving relative URLs against the configured base URL
/// - Default headers including User-Agent and Accept
/// - Transport-level request interceptors
/// - Turning non-2xx responses into `error` envelopes
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use brex_axios::{BaseUrl, ClientConfig};
/// use brex_axios::clients::{ReqwestTransport, Transport, TransportOptions};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap())
///     .build()
///     .unwrap();
///
/// let transport = ReqwestTransport::new(&config)?;
/// let result = transport.get("/posts/1", TransportOptions::default()).await?;
/// println!("{:?}", result.content);
/// ```
pub struct ReqwestTransport {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL relative request paths are resolved against.
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Hooks applied to every request, in registration order.
    interceptors: Vec<TransportInterceptor>,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers.keys())
            .field("interceptors", &format!("<{} interceptors>", self.interceptors.len()))
            .finish()
    }
}

impl ReqwestTransport {
    /// Creates a new transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}brex-axios v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        for (key, value) in config.headers() {
            merge_header(&mut default_headers, key.clone(), value.clone());
        }

        Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
            interceptors: Vec::new(),
        }
    }

    /// Returns the base URL for this transport.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this transport.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResult, HttpError> {
        let request = self
            .interceptors
            .iter()
            .fold(request, |request, interceptor| interceptor(request));

        let url = self.base_url.join(&request.url);

        let headers = self.request_headers(request.headers, request.body.is_some());

        let mut req_builder = self.client.request(request.method.to_reqwest(), &url);
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let status = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        tracing::debug!(method = %request.method, url = %url, status, "HTTP exchange completed");

        let content = Self::parse_body(&body_text);

        if (200..300).contains(&status) {
            return Ok(TransportResult {
                content,
                error: None,
                status,
                headers: res_headers,
            });
        }

        let error = TransportError {
            message: Self::error_message(content.as_ref(), status),
            details: content,
        };
        Ok(TransportResult::failure(error, status, res_headers))
    }

    /// Layers the JSON content type and the per-request headers over the
    /// defaults. Names match case-insensitively, the later value winning.
    fn request_headers(
        &self,
        request_headers: HashMap<String, String>,
        has_body: bool,
    ) -> HashMap<String, String> {
        let mut headers = self.default_headers.clone();
        if has_body {
            merge_header(
                &mut headers,
                "Content-Type".to_string(),
                "application/json".to_string(),
            );
        }
        for (key, value) in request_headers {
            merge_header(&mut headers, key, value);
        }
        headers
    }

    /// Parses response headers into a `HashMap`, joining repeated values.
    ///
    /// Values that are not valid UTF-8 are decoded lossily.
    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut result: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = String::from_utf8_lossy(value.as_bytes());
            result
                .entry(key)
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }
        result
    }

    /// Parses the body as JSON, falling back to a JSON string.
    fn parse_body(body_text: &str) -> Option<serde_json::Value> {
        if body_text.is_empty() {
            return None;
        }
        Some(
            serde_json::from_str(body_text)
                .unwrap_or_else(|_| serde_json::Value::String(body_text.to_string())),
        )
    }

    /// Picks the error message for a non-2xx response.
    fn error_message(body: Option<&serde_json::Value>, status: u16) -> String {
        body.and_then(|body| {
            ["message", "error"]
                .iter()
                .find_map(|key| body.get(key).and_then(serde_json::Value::as_str))
        })
        .map_or_else(
            || format!("Request failed with status code {status}"),
            String::from,
        )
    }
}

// HTTP header names are case-insensitive; drop any differently-cased entry.
fn merge_header(headers: &mut HashMap<String, String>, key: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
    headers.insert(key, value);
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
        Box::pin(self.execute(request))
    }

    fn add_request_interceptor(&mut self, interceptor: TransportInterceptor) {
        self.interceptors.push(interceptor);
    }
}
