//! A facade without interceptors.
//!
//! [`SimpleClient`] exposes the same verbs as
//! [`AxiosStyleClient`](crate::clients::AxiosStyleClient) but returns the
//! transport's `content` directly and applies a single construction-time
//! policy to failed calls.

use serde::de::DeserializeOwned;

use crate::clients::errors::{HttpError, UpstreamError};
use crate::clients::http_client::ReqwestTransport;
use crate::clients::http_request::{HttpMethod, RequestOptions};
use crate::clients::http_response::TransportResult;
use crate::clients::query::build_url_with_params;
use crate::clients::transport::{Transport, TransportOptions};
use crate::config::ClientConfig;

/// A verb-only client with a throw-on-error policy.
///
/// With `throw_on_error` enabled, an envelope carrying an `error` becomes
/// [`HttpError::Upstream`]. With it disabled, the call resolves with the
/// envelope's `content`, which is usually `None` for a failed call; the
/// swallowed error is only reported through `tracing::warn!`.
///
/// # Example
///
/// ```rust,ignore
/// use brex_axios::{BaseUrl, ClientConfig, SimpleClient};
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap())
///     .throw_on_error(true)
///     .build()
///     .unwrap();
/// let client = SimpleClient::new(&config)?;
///
/// let post: Option<serde_json::Value> = client.get("/posts/1", None).await?;
/// ```
pub struct SimpleClient {
    transport: Box<dyn Transport>,
    throw_on_error: bool,
}

// Verify SimpleClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SimpleClient>();
};

impl std::fmt::Debug for SimpleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleClient")
            .field("transport", &"<dyn Transport>")
            .field("throw_on_error", &self.throw_on_error)
            .finish()
    }
}

impl SimpleClient {
    /// Creates a client backed by a [`ReqwestTransport`], taking the policy
    /// from [`ClientConfig::throw_on_error`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the reqwest client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        Ok(Self::with_transport(
            ReqwestTransport::new(config)?,
            config.throw_on_error(),
        ))
    }

    /// Creates a client over any transport.
    pub fn with_transport(transport: impl Transport + 'static, throw_on_error: bool) -> Self {
        Self {
            transport: Box::new(transport),
            throw_on_error,
        }
    }

    /// Returns `true` if failed calls are turned into errors.
    #[must_use]
    pub const fn throw_on_error(&self) -> bool {
        self.throw_on_error
    }

    /// Sends a GET request and returns the response content.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Upstream`] for a failed call when
    /// `throw_on_error` is enabled, [`HttpError::Network`] when the
    /// transport produced no envelope, and [`HttpError::Decode`] when the
    /// content does not deserialize into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>, HttpError> {
        let (url, options) = Self::split(url, options);
        let result = self.transport.get(&url, options).await?;
        self.settle(HttpMethod::Get, &url, result)
    }

    /// Sends a POST request and returns the response content.
    ///
    /// # Errors
    ///
    /// See [`SimpleClient::get`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<serde_json::Value>,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>, HttpError> {
        let (url, options) = Self::split(url, options);
        let result = self.transport.post(&url, data, options).await?;
        self.settle(HttpMethod::Post, &url, result)
    }

    /// Sends a PUT request and returns the response content.
    ///
    /// # Errors
    ///
    /// See [`SimpleClient::get`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<serde_json::Value>,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>, HttpError> {
        let (url, options) = Self::split(url, options);
        let result = self.transport.put(&url, data, options).await?;
        self.settle(HttpMethod::Put, &url, result)
    }

    /// Sends a DELETE request and returns the response content.
    ///
    /// # Errors
    ///
    /// See [`SimpleClient::get`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>, HttpError> {
        let (url, options) = Self::split(url, options);
        let result = self.transport.delete(&url, options).await?;
        self.settle(HttpMethod::Delete, &url, result)
    }

    /// Sends a PATCH request and returns the response content.
    ///
    /// # Errors
    ///
    /// See [`SimpleClient::get`].
    pub async fn patch<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<serde_json::Value>,
        options: Option<RequestOptions>,
    ) -> Result<Option<T>, HttpError> {
        let (url, options) = Self::split(url, options);
        let result = self.transport.patch(&url, data, options).await?;
        self.settle(HttpMethod::Patch, &url, result)
    }

    fn split(url: &str, options: Option<RequestOptions>) -> (String, TransportOptions) {
        let options = options.unwrap_or_default();
        let url = match &options.params {
            Some(params) => build_url_with_params(url, Some(params)),
            None => url.to_string(),
        };
        (
            url,
            TransportOptions::with_headers(options.headers.unwrap_or_default()),
        )
    }

    fn settle<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        result: TransportResult,
    ) -> Result<Option<T>, HttpError> {
        if let Some(error) = result.error {
            if self.throw_on_error {
                return Err(UpstreamError {
                    message: error.message,
                    status: result.status,
                    headers: result.headers,
                    details: error.details,
                }
                .into());
            }
            tracing::warn!(
                method = %method,
                url = %url,
                status = result.status,
                error = %error.message,
                "Request failed; returning content because throw_on_error is disabled"
            );
        }

        result
            .content
            .map(serde_json::from_value)
            .transpose()
            .map_err(HttpError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::http_response::TransportError;
    use crate::clients::interceptors::BoxFuture;
    use crate::clients::transport::{TransportInterceptor, TransportRequest};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    struct Fixed {
        result: TransportResult,
        urls: Arc<Mutex<Vec<String>>>,
    }

    impl Fixed {
        fn new(result: TransportResult) -> Self {
            Self {
                result,
                urls: Arc::default(),
            }
        }
    }

    impl Transport for Fixed {
        fn send(
            &self,
            request: TransportRequest,
        ) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
            self.urls.lock().unwrap().push(request.url);
            let result = self.result.clone();
            Box::pin(async move { Ok(result) })
        }

        fn add_request_interceptor(&mut self, _interceptor: TransportInterceptor) {}
    }

    fn boom() -> TransportResult {
        TransportResult::failure(TransportError::new("boom"), 500, HashMap::new())
    }

    #[tokio::test]
    async fn test_swallowed_error_returns_none() {
        let client = SimpleClient::with_transport(Fixed::new(boom()), false);
        let content: Option<serde_json::Value> = client.get("/x", None).await.unwrap();
        assert!(content.is_none());
    }

    #[tokio::test]
    async fn test_thrown_error_carries_message() {
        let client = SimpleClient::with_transport(Fixed::new(boom()), true);
        let error = client.get::<serde_json::Value>("/x", None).await.unwrap_err();
        assert_eq!(error.to_string(), "boom");
        assert_eq!(error.status(), Some(500));
    }

    #[tokio::test]
    async fn test_success_returns_decoded_content() {
        let transport = Fixed::new(TransportResult::success(json!([1, 2]), 200, HashMap::new()));
        let client = SimpleClient::with_transport(transport, true);

        let content: Option<Vec<u8>> = client.post("/x", None, None).await.unwrap();
        assert_eq!(content, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_params_are_encoded_onto_url() {
        let transport = Fixed::new(TransportResult::success(json!(null), 200, HashMap::new()));
        let urls = Arc::clone(&transport.urls);
        let client = SimpleClient::with_transport(transport, false);

        let options = RequestOptions::builder().param("page", 3).build();
        let _: Option<serde_json::Value> = client.delete("/items", Some(options)).await.unwrap();
        let _: Option<serde_json::Value> = client.patch("/plain", None, None).await.unwrap();

        assert_eq!(*urls.lock().unwrap(), vec!["/items?page=3", "/plain"]);
    }
}
