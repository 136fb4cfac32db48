//! Request and response interceptors.
//!
//! Interceptors are held in two append-only registries owned by the
//! facade. Request interceptors and response success handlers run as a
//! left fold in registration order; response error handlers are
//! first-match-wins.
//!
//! # Example
//!
//! ```rust,ignore
//! use brex_axios::clients::InterceptorError;
//!
//! client.interceptors().request.register(|mut parts| async move {
//!     parts.headers.insert("X-Request-Id".to_string(), "abc".to_string());
//!     Ok(parts)
//! });
//!
//! client.interceptors().response.register_with_error(
//!     |response| async move { Ok(response) },
//!     |error| async move { Err(InterceptorError::new(format!("wrapped: {error}")).into()) },
//! );
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use crate::clients::errors::HttpError;
use crate::clients::http_request::RequestParts;
use crate::clients::http_response::HttpResponse;

/// A boxed future that is `Send`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Transforms `{url, headers}` before the request is dispatched.
///
/// Returning an error aborts the call before dispatch; response error
/// handlers never see it.
pub trait RequestInterceptor: Send + Sync {
    /// Returns the (possibly modified) request parts.
    fn intercept(&self, request: RequestParts) -> BoxFuture<'_, Result<RequestParts, HttpError>>;
}

impl<F, Fut> RequestInterceptor for F
where
    F: Fn(RequestParts) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RequestParts, HttpError>> + Send + 'static,
{
    fn intercept(&self, request: RequestParts) -> BoxFuture<'_, Result<RequestParts, HttpError>> {
        Box::pin(self(request))
    }
}

/// Transforms a successful response.
pub trait ResponseInterceptor: Send + Sync {
    /// Returns the (possibly modified) response.
    fn on_success(&self, response: HttpResponse) -> BoxFuture<'_, Result<HttpResponse, HttpError>>;
}

impl<F, Fut> ResponseInterceptor for F
where
    F: Fn(HttpResponse) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, HttpError>> + Send + 'static,
{
    fn on_success(&self, response: HttpResponse) -> BoxFuture<'_, Result<HttpResponse, HttpError>> {
        Box::pin(self(response))
    }
}

/// Settles a failed call.
///
/// `Ok` replaces the error with a response; `Err` rejects the call with
/// the returned error.
pub trait ErrorInterceptor: Send + Sync {
    /// Handles the error of a failed call.
    fn on_error(&self, error: HttpError) -> BoxFuture<'_, Result<HttpResponse, HttpError>>;
}

impl<F, Fut> ErrorInterceptor for F
where
    F: Fn(HttpError) -> Fut + Send + Sync,
    Fut: Future<Output = Result<HttpResponse, HttpError>> + Send + 'static,
{
    fn on_error(&self, error: HttpError) -> BoxFuture<'_, Result<HttpResponse, HttpError>> {
        Box::pin(self(error))
    }
}

/// A success handler paired with an optional error handler.
#[derive(Clone)]
pub struct ResponseInterceptorEntry {
    /// Runs on every successful response, in registration order.
    pub on_success: Arc<dyn ResponseInterceptor>,
    /// Consulted on failure; the first entry that has one wins.
    pub on_error: Option<Arc<dyn ErrorInterceptor>>,
}

impl fmt::Debug for ResponseInterceptorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseInterceptorEntry")
            .field("on_error", &self.on_error.is_some())
            .finish_non_exhaustive()
    }
}

/// Ordered registry of request interceptors.
#[derive(Default)]
pub struct RequestInterceptors {
    entries: RwLock<Vec<Arc<dyn RequestInterceptor>>>,
}

impl RequestInterceptors {
    /// Appends a closure interceptor.
    pub fn register<F, Fut>(&self, interceptor: F)
    where
        F: Fn(RequestParts) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<RequestParts, HttpError>> + Send + 'static,
    {
        self.register_interceptor(interceptor);
    }

    /// Appends any [`RequestInterceptor`] implementation.
    pub fn register_interceptor(&self, interceptor: impl RequestInterceptor + 'static) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(interceptor));
    }

    /// Returns the number of registered interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn RequestInterceptor>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for RequestInterceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestInterceptors")
            .field("len", &self.len())
            .finish()
    }
}

/// Ordered registry of response interceptor entries.
#[derive(Debug, Default)]
pub struct ResponseInterceptors {
    entries: RwLock<Vec<ResponseInterceptorEntry>>,
}

impl ResponseInterceptors {
    /// Appends a success handler without an error handler.
    pub fn register<S, SFut>(&self, on_success: S)
    where
        S: Fn(HttpResponse) -> SFut + Send + Sync + 'static,
        SFut: Future<Output = Result<HttpResponse, HttpError>> + Send + 'static,
    {
        self.register_entry(ResponseInterceptorEntry {
            on_success: Arc::new(on_success),
            on_error: None,
        });
    }

    /// Appends a success handler paired with an error handler.
    pub fn register_with_error<S, SFut, E, EFut>(&self, on_success: S, on_error: E)
    where
        S: Fn(HttpResponse) -> SFut + Send + Sync + 'static,
        SFut: Future<Output = Result<HttpResponse, HttpError>> + Send + 'static,
        E: Fn(HttpError) -> EFut + Send + Sync + 'static,
        EFut: Future<Output = Result<HttpResponse, HttpError>> + Send + 'static,
    {
        self.register_entry(ResponseInterceptorEntry {
            on_success: Arc::new(on_success),
            on_error: Some(Arc::new(on_error)),
        });
    }

    /// Appends a prebuilt entry.
    pub fn register_entry(&self, entry: ResponseInterceptorEntry) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Returns the number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn snapshot(&self) -> Vec<ResponseInterceptorEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// The two interceptor registries, mirroring `interceptors`.
#[derive(Debug, Default)]
pub struct Interceptors {
    /// Request interceptors.
    pub request: RequestInterceptors,
    /// Response interceptors.
    pub response: ResponseInterceptors,
}

// Verify the registries are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Interceptors>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Suffix(&'static str);

    impl RequestInterceptor for Suffix {
        fn intercept(
            &self,
            mut request: RequestParts,
        ) -> BoxFuture<'_, Result<RequestParts, HttpError>> {
            request.url.push_str(self.0);
            Box::pin(async move { Ok(request) })
        }
    }

    #[tokio::test]
    async fn test_closure_and_struct_interceptors_share_registry() {
        let registry = RequestInterceptors::default();
        registry.register(|mut parts: RequestParts| async move {
            parts.url.push_str("/a");
            Ok(parts)
        });
        registry.register_interceptor(Suffix("/b"));

        assert_eq!(registry.len(), 2);

        let mut parts = RequestParts::new("", HashMap::new());
        for interceptor in registry.snapshot() {
            parts = interceptor.intercept(parts).await.unwrap();
        }
        assert_eq!(parts.url, "/a/b");
    }

    #[test]
    fn test_response_registry_tracks_error_handlers() {
        let registry = ResponseInterceptors::default();
        assert!(registry.is_empty());

        registry.register(|response| async move { Ok(response) });
        registry.register_with_error(
            |response| async move { Ok(response) },
            |error| async move { Err(error) },
        );

        let entries = registry.snapshot();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].on_error.is_none());
        assert!(entries[1].on_error.is_some());
    }

    #[test]
    fn test_snapshot_is_detached_from_later_registrations() {
        let registry = RequestInterceptors::default();
        registry.register(|parts| async move { Ok(parts) });
        let snapshot = registry.snapshot();

        registry.register(|parts| async move { Ok(parts) });
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_entry_debug_hides_closures() {
        let registry = ResponseInterceptors::default();
        registry.register(|response| async move { Ok(response) });
        let debug = format!("{:?}", registry.snapshot()[0]);
        assert!(debug.contains("on_error: false"));
    }
}
