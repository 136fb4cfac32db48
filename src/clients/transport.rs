//! The underlying transport the facades adapt.
//!
//! A [`Transport`] performs the actual exchange and reports the outcome as a
//! [`TransportResult`] envelope. [`ReqwestTransport`](crate::clients::ReqwestTransport)
//! is the shipped implementation; anything else (a test double, another HTTP
//! library) can be plugged in by implementing [`Transport::send`] and
//! [`Transport::add_request_interceptor`].
//!
//! # Implementing the trait
//!
//! ```rust
//! use std::collections::HashMap;
//! use brex_axios::clients::{
//!     BoxFuture, HttpError, Transport, TransportInterceptor, TransportRequest, TransportResult,
//! };
//!
//! struct Echo {
//!     interceptors: Vec<TransportInterceptor>,
//! }
//!
//! impl Transport for Echo {
//!     fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
//!         let request = self.interceptors.iter().fold(request, |req, f| f(req));
//!         Box::pin(async move {
//!             Ok(TransportResult::success(serde_json::json!(request.url), 200, HashMap::new()))
//!         })
//!     }
//!
//!     fn add_request_interceptor(&mut self, interceptor: TransportInterceptor) {
//!         self.interceptors.push(interceptor);
//!     }
//! }
//! ```

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::TransportResult;
use crate::clients::interceptors::BoxFuture;

/// A request as the transport sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The URL, relative to the transport's base URL or absolute.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// The JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl TransportRequest {
    /// Creates a transport request.
    #[must_use]
    pub fn new(
        method: HttpMethod,
        url: impl Into<String>,
        body: Option<serde_json::Value>,
        options: TransportOptions,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            headers: options.headers,
            body,
        }
    }
}

/// Per-call options passed to the transport's verb methods.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Request headers.
    pub headers: HashMap<String, String>,
}

impl TransportOptions {
    /// Creates options carrying the given headers.
    #[must_use]
    pub const fn with_headers(headers: HashMap<String, String>) -> Self {
        Self { headers }
    }
}

/// A synchronous hook that rewrites every request inside the transport.
pub type TransportInterceptor = Box<dyn Fn(TransportRequest) -> TransportRequest + Send + Sync>;

/// The request-executing client the facades adapt.
///
/// Implementations report HTTP-level failures inside the returned
/// envelope (`error`) and reserve `Err` for failures where no envelope
/// could be produced.
pub trait Transport: Send + Sync {
    /// Executes a request.
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResult, HttpError>>;

    /// Installs a hook that runs, in registration order, on every request
    /// before it is executed.
    fn add_request_interceptor(&mut self, interceptor: TransportInterceptor);

    /// Sends a GET request.
    fn get(
        &self,
        url: &str,
        options: TransportOptions,
    ) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
        self.send(TransportRequest::new(HttpMethod::Get, url, None, options))
    }

    /// Sends a POST request.
    fn post(
        &self,
        url: &str,
        body: Option<serde_json::Value>,
        options: TransportOptions,
    ) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
        self.send(TransportRequest::new(HttpMethod::Post, url, body, options))
    }

    /// Sends a PUT request.
    fn put(
        &self,
        url: &str,
        body: Option<serde_json::Value>,
        options: TransportOptions,
    ) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
        self.send(TransportRequest::new(HttpMethod::Put, url, body, options))
    }

    /// Sends a DELETE request.
    fn delete(
        &self,
        url: &str,
        options: TransportOptions,
    ) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
        self.send(TransportRequest::new(HttpMethod::Delete, url, None, options))
    }

    /// Sends a PATCH request.
    fn patch(
        &self,
        url: &str,
        body: Option<serde_json::Value>,
        options: TransportOptions,
    ) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
        self.send(TransportRequest::new(HttpMethod::Patch, url, body, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<TransportRequest>>,
        interceptors: Vec<TransportInterceptor>,
    }

    impl Transport for Recorder {
        fn send(
            &self,
            request: TransportRequest,
        ) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
            let request = self.interceptors.iter().fold(request, |req, f| f(req));
            self.sent.lock().unwrap().push(request);
            Box::pin(async { Ok(TransportResult::success(serde_json::Value::Null, 200, HashMap::new())) })
        }

        fn add_request_interceptor(&mut self, interceptor: TransportInterceptor) {
            self.interceptors.push(interceptor);
        }
    }

    #[tokio::test]
    async fn test_verb_methods_build_requests() {
        let transport = Recorder::default();
        transport.get("/a", TransportOptions::default()).await.unwrap();
        transport
            .post("/b", Some(serde_json::json!({"x": 1})), TransportOptions::default())
            .await
            .unwrap();
        transport.put("/c", None, TransportOptions::default()).await.unwrap();
        transport.delete("/d", TransportOptions::default()).await.unwrap();
        transport.patch("/e", None, TransportOptions::default()).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        let methods: Vec<HttpMethod> = sent.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![
                HttpMethod::Get,
                HttpMethod::Post,
                HttpMethod::Put,
                HttpMethod::Delete,
                HttpMethod::Patch
            ]
        );
        assert_eq!(sent[1].body, Some(serde_json::json!({"x": 1})));
        assert!(sent[2].body.is_none());
    }

    #[tokio::test]
    async fn test_transport_interceptors_run_in_order() {
        let mut transport = Recorder::default();
        transport.add_request_interceptor(Box::new(|mut req| {
            req.url.push_str("?first");
            req
        }));
        transport.add_request_interceptor(Box::new(|mut req| {
            req.url.push_str("&second");
            req
        }));

        transport.get("/a", TransportOptions::default()).await.unwrap();
        assert_eq!(transport.sent.lock().unwrap()[0].url, "/a?first&second");
    }
}
