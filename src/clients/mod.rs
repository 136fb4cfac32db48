//! HTTP client facades and the transport they adapt.
//!
//! This module layers an axios-style surface over a [`Transport`]: verb
//! operations, a generic `request`, mutable default headers and
//! request/response interceptors.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`AxiosStyleClient`]: The interceptor-capable facade
//! - [`SimpleClient`]: A facade with a throw-on-error policy and no interceptors
//! - [`Transport`]: The request-executing client the facades adapt
//! - [`ReqwestTransport`]: The shipped `reqwest` transport
//! - [`HttpResponse`]: The uniform response shape
//! - [`TransportResult`]: The raw `{content, error}` envelope a transport returns
//! - [`HttpError`]: Everything a call can fail with
//!
//! # Example
//!
//! ```rust,ignore
//! use brex_axios::{AxiosStyleClient, BaseUrl, ClientConfig};
//! use brex_axios::clients::InterceptorError;
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap())
//!     .build()
//!     .unwrap();
//! let client = AxiosStyleClient::new(&config)?;
//!
//! client.interceptors().request.register(|mut parts| async move {
//!     parts.headers.insert("X-Request-Id".to_string(), "abc".to_string());
//!     Ok(parts)
//! });
//!
//! let response = client.get::<serde_json::Value>("/posts/1", None).await?;
//! ```
//!
//! # Call Pipeline
//!
//! Each call on [`AxiosStyleClient`] encodes the query string, merges
//! default headers, folds the request interceptors, invokes the
//! transport, normalizes the envelope, and then either folds the success
//! handlers or hands the failure to the first registered error handler.

mod axios_style;
mod defaults;
mod errors;
mod http_client;
mod http_request;
mod http_response;
mod interceptors;
mod pipeline;
mod query;
mod simple;
mod transport;

pub use axios_style::AxiosStyleClient;
pub use defaults::{CommonHeaders, DefaultHeaders, DefaultHeadersInterceptor, Defaults};
pub use errors::{HttpError, InterceptorError, UnsupportedMethodError, UpstreamError};
pub use http_client::{ReqwestTransport, SDK_VERSION};
pub use http_request::{
    HttpMethod, RequestConfig, RequestConfigBuilder, RequestOptions, RequestOptionsBuilder,
    RequestParts,
};
pub use http_response::{normalize, HttpResponse, TransportError, TransportResult};
pub use interceptors::{
    BoxFuture, ErrorInterceptor, Interceptors, RequestInterceptor, RequestInterceptors,
    ResponseInterceptor, ResponseInterceptorEntry, ResponseInterceptors,
};
pub use query::build_url_with_params;
pub use simple::SimpleClient;
pub use transport::{Transport, TransportInterceptor, TransportOptions, TransportRequest};
