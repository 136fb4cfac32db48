//! The interceptor-capable facade.
//!
//! This module provides [`AxiosStyleClient`], which gives any
//! [`Transport`] the familiar `get`/`post`/`put`/`delete`/`patch`/`request`
//! surface together with default headers and interceptor registries.

use serde::de::DeserializeOwned;

use crate::clients::defaults::Defaults;
use crate::clients::errors::{HttpError, UnsupportedMethodError};
use crate::clients::http_client::ReqwestTransport;
use crate::clients::http_request::{HttpMethod, RequestConfig, RequestOptions, RequestParts};
use crate::clients::http_response::{HttpResponse, TransportResult};
use crate::clients::interceptors::Interceptors;
use crate::clients::pipeline::Pipeline;
use crate::clients::transport::{Transport, TransportOptions, TransportRequest};
use crate::config::ClientConfig;

/// An HTTP client with default headers and request/response interceptors.
///
/// Every call runs the same pipeline. The query string is encoded onto the
/// URL and default headers are merged under the per-call headers. Request
/// interceptors then transform `{url, headers}` and the transport sends the
/// encoded URL with the folded headers. Response interceptors post-process
/// the outcome.
///
/// # Thread Safety
///
/// `AxiosStyleClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use brex_axios::{AxiosStyleClient, BaseUrl, ClientConfig, RequestOptions};
/// use serde_json::Value;
///
/// let config = ClientConfig::builder()
///     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap())
///     .build()
///     .unwrap();
/// let client = AxiosStyleClient::new(&config)?;
///
/// client.defaults().headers.common.insert("Authorization", "Bearer token");
///
/// let options = RequestOptions::builder().param("userId", 1).build();
/// let response = client.get::<Value>("/posts", Some(options)).await?;
/// println!("{} -> {}", response.status, response.data);
/// ```
pub struct AxiosStyleClient {
    transport: Box<dyn Transport>,
    pipeline: Pipeline,
}

// Verify AxiosStyleClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AxiosStyleClient>();
};

impl std::fmt::Debug for AxiosStyleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxiosStyleClient")
            .field("transport", &"<dyn Transport>")
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

impl AxiosStyleClient {
    /// Creates a client backed by a [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the reqwest client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }

    /// Creates a client over any transport.
    ///
    /// The default-header merge is also installed as a transport
    /// interceptor, so the transport adds `defaults().headers.common` to
    /// every request it executes.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        let mut transport: Box<dyn Transport> = Box::new(transport);
        let pipeline = Pipeline::new();

        let common = pipeline.defaults().headers.common.clone();
        transport.add_request_interceptor(Box::new(move |mut request: TransportRequest| {
            request.headers = common.merge_under(request.headers);
            request
        }));

        Self {
            transport,
            pipeline,
        }
    }

    /// Returns the mutable defaults (`defaults().headers.common`).
    #[must_use]
    pub const fn defaults(&self) -> &Defaults {
        self.pipeline.defaults()
    }

    /// Returns the interceptor registries.
    #[must_use]
    pub const fn interceptors(&self) -> &Interceptors {
        self.pipeline.interceptors()
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns the call's unhandled failure: a request interceptor error,
    /// a transport or upstream error no error handler settled, or a decode
    /// error if the final data does not deserialize into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse<T>, HttpError> {
        self.call(HttpMethod::Get, url, None, options.unwrap_or_default())
            .await
    }

    /// Sends a POST request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`AxiosStyleClient::get`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<serde_json::Value>,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse<T>, HttpError> {
        self.call(HttpMethod::Post, url, data, options.unwrap_or_default())
            .await
    }

    /// Sends a PUT request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`AxiosStyleClient::get`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<serde_json::Value>,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse<T>, HttpError> {
        self.call(HttpMethod::Put, url, data, options.unwrap_or_default())
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`AxiosStyleClient::get`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse<T>, HttpError> {
        self.call(HttpMethod::Delete, url, None, options.unwrap_or_default())
            .await
    }

    /// Sends a PATCH request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`AxiosStyleClient::get`].
    pub async fn patch<T: DeserializeOwned>(
        &self,
        url: &str,
        data: Option<serde_json::Value>,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse<T>, HttpError> {
        self.call(HttpMethod::Patch, url, data, options.unwrap_or_default())
            .await
    }

    /// Sends a request described by a [`RequestConfig`].
    ///
    /// The method defaults to GET and is matched case-insensitively. The
    /// query is encoded and the request interceptors run over the config's
    /// URL and headers, then the call is handed to the matching verb
    /// operation with the encoded URL and the folded headers. The verb runs
    /// its own Encode and pre-process stages, so every request interceptor
    /// runs twice per `request` call. The body is only forwarded for POST,
    /// PUT and PATCH.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnsupportedMethod`] after the request
    /// interceptors have run if the method is unknown or has no verb
    /// operation (HEAD, OPTIONS); an interceptor failure is returned instead
    /// when one occurs. Otherwise fails as [`AxiosStyleClient::get`] does.
    pub async fn request<T: DeserializeOwned>(
        &self,
        config: RequestConfig,
    ) -> Result<HttpResponse<T>, HttpError> {
        let method = config.resolve_method();
        let parts = self
            .pipeline
            .prepare(&config.url, config.params.as_ref(), config.headers)
            .await?;

        let url = parts.url.as_str();
        let options = Some(RequestOptions {
            headers: Some(parts.headers),
            params: None,
        });
        match method? {
            HttpMethod::Get => self.get(url, options).await,
            HttpMethod::Post => self.post(url, config.data, options).await,
            HttpMethod::Put => self.put(url, config.data, options).await,
            HttpMethod::Delete => self.delete(url, options).await,
            HttpMethod::Patch => self.patch(url, config.data, options).await,
            method @ (HttpMethod::Head | HttpMethod::Options) => {
                Err(UnsupportedMethodError::new(method.as_str()).into())
            }
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse<T>, HttpError> {
        let parts = self
            .pipeline
            .prepare(url, options.params.as_ref(), options.headers)
            .await?;

        tracing::debug!(method = %method, url = %parts.url, "Dispatching request");

        let outcome = self.dispatch(method, parts, data).await;
        self.pipeline.settle(outcome).await?.decode()
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        parts: RequestParts,
        data: Option<serde_json::Value>,
    ) -> Result<TransportResult, HttpError> {
        let options = TransportOptions::with_headers(parts.headers);
        let url = parts.url.as_str();
        match method {
            HttpMethod::Get => self.transport.get(url, options).await,
            HttpMethod::Post => self.transport.post(url, data, options).await,
            HttpMethod::Put => self.transport.put(url, data, options).await,
            HttpMethod::Delete => self.transport.delete(url, options).await,
            HttpMethod::Patch => self.transport.patch(url, data, options).await,
            HttpMethod::Head | HttpMethod::Options => {
                Err(UnsupportedMethodError::new(method.as_str()).into())
            }
        }
    }
}
