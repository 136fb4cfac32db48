//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated base URL that relative request paths are resolved against.
///
/// The URL must carry a scheme and a non-empty host. A trailing `/` is
/// trimmed so that [`join`](Self::join) can insert exactly one separator.
///
/// # Example
///
/// ```rust
/// use brex_axios::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/v1");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.example.com");
/// assert_eq!(url.join("/posts/1"), "https://api.example.com/v1/posts/1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Resolves `path` against this base URL.
    ///
    /// Absolute `http://` and `https://` URLs are returned unchanged.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        if path.is_empty() {
            return self.url.clone();
        }
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

fn is_absolute(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "jsonplaceholder.typicode.com");

        // With port
        let url = BaseUrl::new("http://localhost:3000").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");

        // With path
        let url = BaseUrl::new("https://api.example.com/v2").unwrap();
        assert_eq!(url.host_name(), "api.example.com");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        // No scheme
        assert!(BaseUrl::new("api.example.com").is_err());

        // Empty host
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("https:///path").is_err());

        // Invalid scheme
        assert!(BaseUrl::new("://example.com").is_err());
        assert!(BaseUrl::new("ht-tp://example.com").is_err());
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let url = BaseUrl::new("https://api.example.com/").unwrap();
        assert_eq!(url.as_ref(), "https://api.example.com");
    }

    #[test]
    fn test_join_inserts_single_separator() {
        let url = BaseUrl::new("https://api.example.com/v1").unwrap();
        assert_eq!(url.join("posts"), "https://api.example.com/v1/posts");
        assert_eq!(url.join("/posts"), "https://api.example.com/v1/posts");
        assert_eq!(url.join("//posts"), "https://api.example.com/v1/posts");
        assert_eq!(url.join(""), "https://api.example.com/v1");
    }

    #[test]
    fn test_join_keeps_absolute_urls() {
        let url = BaseUrl::new("https://api.example.com").unwrap();
        assert_eq!(
            url.join("http://other.example.com/x?y=1"),
            "http://other.example.com/x?y=1"
        );
        assert_eq!(url.join("HTTPS://other.example.com"), "HTTPS://other.example.com");
    }

    #[test]
    fn test_base_url_serde() {
        let url = BaseUrl::new("https://api.example.com").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""https://api.example.com""#);

        let restored: BaseUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, url);

        let invalid: Result<BaseUrl, _> = serde_json::from_str(r#""nope""#);
        assert!(invalid.is_err());
    }
}
