//! The per-call request pipeline.
//!
//! A call moves through these stages, strictly in order:
//!
//! 1. **Encode** the query string onto the URL
//! 2. **Pre-process** `{url, headers}`: default-header merge, then every
//!    request interceptor as a left fold
//! 3. **Invoke** the transport (done by the facade)
//! 4. **Normalize** the envelope into an [`HttpResponse`]
//! 5. **Post-process** a success through every success handler as a left fold
//! 6. or hand a failure to the first registered error handler
//!
//! Interceptors in stage 2 see the URL as the caller passed it, without
//! the encoded query. The transport always receives the stage 1 URL; a URL
//! returned by an interceptor is not dispatched.
//!
//! Failures in stage 2 never reach error handlers. Failures in stages 3
//! to 5 do.

use std::collections::{BTreeMap, HashMap};

use crate::clients::defaults::{DefaultHeadersInterceptor, Defaults};
use crate::clients::errors::HttpError;
use crate::clients::http_request::RequestParts;
use crate::clients::http_response::{normalize, HttpResponse, TransportResult};
use crate::clients::interceptors::{Interceptors, RequestInterceptor, ResponseInterceptorEntry};
use crate::clients::query::build_url_with_params;

/// Registries and defaults shared by every call on one facade.
#[derive(Debug)]
pub(crate) struct Pipeline {
    defaults: Defaults,
    interceptors: Interceptors,
    builtin: DefaultHeadersInterceptor,
}

impl Pipeline {
    pub(crate) fn new() -> Self {
        let defaults = Defaults::default();
        let builtin = DefaultHeadersInterceptor::new(defaults.headers.common.clone());
        Self {
            defaults,
            interceptors: Interceptors::default(),
            builtin,
        }
    }

    pub(crate) const fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub(crate) const fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    /// Runs the Encode and pre-process stages.
    ///
    /// The returned parts carry the encoded URL and the folded headers.
    pub(crate) async fn prepare(
        &self,
        url: &str,
        params: Option<&BTreeMap<String, String>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<RequestParts, HttpError> {
        let encoded = build_url_with_params(url, params);
        let folded = self
            .pre_process(RequestParts::new(url, headers.unwrap_or_default()))
            .await?;
        Ok(RequestParts::new(encoded, folded.headers))
    }

    /// Folds the request parts through the built-in merge and then every
    /// registered request interceptor.
    pub(crate) async fn pre_process(&self, parts: RequestParts) -> Result<RequestParts, HttpError> {
        let mut parts = self.builtin.intercept(parts).await?;
        for interceptor in self.interceptors.request.snapshot() {
            parts = interceptor.intercept(parts).await?;
        }
        Ok(parts)
    }

    /// Runs normalization and post-processing over a transport outcome.
    pub(crate) async fn settle(
        &self,
        outcome: Result<TransportResult, HttpError>,
    ) -> Result<HttpResponse, HttpError> {
        let entries = self.interceptors.response.snapshot();
        match Self::post_process_success(&entries, outcome).await {
            Ok(response) => Ok(response),
            Err(error) => Self::post_process_error(&entries, error).await,
        }
    }

    async fn post_process_success(
        entries: &[ResponseInterceptorEntry],
        outcome: Result<TransportResult, HttpError>,
    ) -> Result<HttpResponse, HttpError> {
        let mut response = normalize(outcome?)?;
        for entry in entries {
            response = entry.on_success.on_success(response).await?;
        }
        Ok(response)
    }

    async fn post_process_error(
        entries: &[ResponseInterceptorEntry],
        error: HttpError,
    ) -> Result<HttpResponse, HttpError> {
        let Some((position, handler)) = entries
            .iter()
            .enumerate()
            .find_map(|(i, entry)| entry.on_error.as_ref().map(|handler| (i, handler)))
        else {
            return Err(error);
        };

        tracing::debug!(
            handler = position,
            error = %error,
            "Response error handler settling failed call"
        );
        handler.on_error(error).await
    }
}
