//! Response types and the response normalizer.
//!
//! This module provides the uniform [`HttpResponse`] shape callers and
//! interceptors see, the raw [`TransportResult`] envelope a transport
//! produces, and [`normalize`], the single place an envelope's `error`
//! is turned into a failure.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::errors::{HttpError, UpstreamError};

/// The uniform response shape.
///
/// Produced only by [`normalize`]; this is the only response shape that
/// interceptors and callers ever see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse<T = serde_json::Value> {
    /// The response payload.
    pub data: T,
    /// The HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
}

impl<T> HttpResponse<T> {
    /// Creates a response.
    #[must_use]
    pub const fn new(data: T, status: u16, headers: HashMap<String, String>) -> Self {
        Self {
            data,
            status,
            headers,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns a header value by exact name, falling back to a
    /// case-insensitive match.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }
}

impl HttpResponse<serde_json::Value> {
    /// Decodes the JSON payload into a typed response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<HttpResponse<T>, HttpError> {
        let data = serde_json::from_value(self.data)?;
        Ok(HttpResponse {
            data,
            status: self.status,
            headers: self.headers,
        })
    }
}

/// The error half of a [`TransportResult`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportError {
    /// Human-readable failure message.
    pub message: String,
    /// Extra details the transport attached to the failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TransportError {
    /// Creates a transport error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }
}

/// The raw result envelope produced by a [`Transport`](crate::clients::Transport).
///
/// Exactly one of `content`/`error` is expected to be meaningful; when
/// both are present `error` wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportResult<T = serde_json::Value> {
    /// The response payload, when the call succeeded.
    pub content: Option<T>,
    /// The failure, when the call failed.
    pub error: Option<TransportError>,
    /// The HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
}

impl<T> TransportResult<T> {
    /// Creates a successful envelope.
    #[must_use]
    pub fn success(content: T, status: u16, headers: HashMap<String, String>) -> Self {
        Self {
            content: Some(content),
            error: None,
            status,
            headers,
        }
    }

    /// Creates a failed envelope.
    #[must_use]
    pub fn failure(error: TransportError, status: u16, headers: HashMap<String, String>) -> Self {
        Self {
            content: None,
            error: Some(error),
            status,
            headers,
        }
    }
}

/// Converts a transport envelope into the uniform response shape.
///
/// Missing content on success becomes JSON `null`.
///
/// # Errors
///
/// Returns [`UpstreamError`] carrying the envelope's message whenever
/// `result.error` is present, regardless of `result.content`.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use brex_axios::clients::{normalize, TransportError, TransportResult};
///
/// let failed = TransportResult::failure(TransportError::new("boom"), 500, HashMap::new());
/// assert_eq!(normalize(failed).unwrap_err().message, "boom");
/// ```
pub fn normalize(result: TransportResult) -> Result<HttpResponse, UpstreamError> {
    if let Some(error) = result.error {
        return Err(UpstreamError {
            message: error.message,
            status: result.status,
            headers: result.headers,
            details: error.details,
        });
    }

    Ok(HttpResponse {
        data: result.content.unwrap_or(serde_json::Value::Null),
        status: result.status,
        headers: result.headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers() -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers
    }

    #[test]
    fn test_normalize_success_copies_fields() {
        let result = TransportResult::success(json!({"id": 1}), 200, headers());
        let response = normalize(result).unwrap();

        assert_eq!(response.data, json!({"id": 1}));
        assert_eq!(response.status, 200);
        assert_eq!(response.headers, headers());
    }

    #[test]
    fn test_normalize_failure_forwards_message() {
        let mut error = TransportError::new("Request failed with status code 404");
        error.details = Some(json!({"detail": "missing"}));
        let result = TransportResult::failure(error, 404, headers());

        let error = normalize(result).unwrap_err();
        assert_eq!(error.message, "Request failed with status code 404");
        assert_eq!(error.status, 404);
        assert_eq!(error.details, Some(json!({"detail": "missing"})));
    }

    #[test]
    fn test_normalize_error_wins_over_content() {
        let result = TransportResult {
            content: Some(json!({"id": 1})),
            error: Some(TransportError::new("boom")),
            status: 200,
            headers: HashMap::new(),
        };

        assert_eq!(normalize(result).unwrap_err().message, "boom");
    }

    #[test]
    fn test_normalize_missing_content_becomes_null() {
        let result = TransportResult {
            content: None,
            error: None,
            status: 204,
            headers: HashMap::new(),
        };

        let response = normalize(result).unwrap();
        assert_eq!(response.data, serde_json::Value::Null);
        assert_eq!(response.status, 204);
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for status in 200..=299 {
            let response = HttpResponse::new(json!(null), status, HashMap::new());
            assert!(response.is_ok(), "Expected is_ok() for {status}");
        }
        assert!(!HttpResponse::new(json!(null), 404, HashMap::new()).is_ok());
        assert!(!HttpResponse::new(json!(null), 500, HashMap::new()).is_ok());
    }

    #[test]
    fn test_header_lookup_falls_back_to_case_insensitive() {
        let response = HttpResponse::new(json!(null), 200, headers());
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Post {
        id: u32,
        title: String,
    }

    #[test]
    fn test_decode_into_typed_response() {
        let response = HttpResponse::new(json!({"id": 1, "title": "hello"}), 200, headers());
        let typed: HttpResponse<Post> = response.decode().unwrap();

        assert_eq!(
            typed.data,
            Post {
                id: 1,
                title: "hello".to_string()
            }
        );
        assert_eq!(typed.status, 200);
    }

    #[test]
    fn test_decode_mismatch_is_decode_error() {
        let response = HttpResponse::new(json!("not a post"), 200, HashMap::new());
        let result: Result<HttpResponse<Post>, _> = response.decode();
        assert!(matches!(result, Err(HttpError::Decode(_))));
    }
}
