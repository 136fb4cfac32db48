//! Adapter-wide default headers.
//!
//! [`CommonHeaders`] is a shared handle: the facade, its built-in request
//! interceptor and the transport-level hook all read the same map, so a
//! header inserted through `client.defaults().headers.common` is visible to
//! every later call.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::clients::http_request::RequestParts;
use crate::clients::interceptors::{BoxFuture, RequestInterceptor};
use crate::clients::HttpError;

/// A shared, mutable header map merged under every outgoing request.
#[derive(Clone, Debug, Default)]
pub struct CommonHeaders {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl CommonHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, returning the previous value for that name.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into())
    }

    /// Removes a header, returning its value.
    pub fn remove(&self, name: &str) -> Option<String> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Returns a copy of a header value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Returns `true` if a header with this exact name is set.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no headers are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every header.
    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns a copy of the current headers.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges these headers under `headers`; entries in `headers` win.
    #[must_use]
    pub fn merge_under(&self, headers: HashMap<String, String>) -> HashMap<String, String> {
        let mut merged = self.snapshot();
        merged.extend(headers);
        merged
    }
}

/// Header defaults, mirroring `defaults.headers`.
#[derive(Clone, Debug, Default)]
pub struct DefaultHeaders {
    /// Headers applied to every request regardless of method.
    pub common: CommonHeaders,
}

/// Adapter defaults, mirroring `defaults`.
#[derive(Clone, Debug, Default)]
pub struct Defaults {
    /// Header defaults.
    pub headers: DefaultHeaders,
}

/// The built-in request interceptor that merges default headers.
///
/// The pipeline runs it before any user-registered interceptor, so every
/// interceptor sees the merged header set.
#[derive(Clone, Debug)]
pub struct DefaultHeadersInterceptor {
    common: CommonHeaders,
}

impl DefaultHeadersInterceptor {
    /// Creates the interceptor over a shared header map.
    #[must_use]
    pub const fn new(common: CommonHeaders) -> Self {
        Self { common }
    }
}

impl RequestInterceptor for DefaultHeadersInterceptor {
    fn intercept(&self, request: RequestParts) -> BoxFuture<'_, Result<RequestParts, HttpError>> {
        let headers = self.common.merge_under(request.headers);
        Box::pin(async move {
            Ok(RequestParts {
                url: request.url,
                headers,
            })
        })
    }
}
