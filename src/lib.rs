//! # brex-axios
//!
//! An axios-style HTTP client facade over a pluggable transport.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - A validated [`BaseUrl`] newtype
//! - [`AxiosStyleClient`]: `get`/`post`/`put`/`delete`/`patch`/`request` with
//!   default headers and request/response interceptors
//! - [`SimpleClient`]: the same verbs with a throw-on-error policy
//! - A [`Transport`](clients::Transport) trait with a `reqwest`-backed
//!   implementation, [`ReqwestTransport`]
//!
//! ## Quick Start
//!
//! ```rust
//! use brex_axios::{BaseUrl, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap())
//!     .header("X-Client", "quick-start")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://jsonplaceholder.typicode.com");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use brex_axios::{AxiosStyleClient, BaseUrl, ClientConfig, RequestConfig, RequestOptions};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     id: u64,
//!     title: String,
//! }
//!
//! let config = ClientConfig::builder()
//!     .base_url(BaseUrl::new("https://jsonplaceholder.typicode.com").unwrap())
//!     .build()
//!     .unwrap();
//! let client = AxiosStyleClient::new(&config)?;
//!
//! // Typed GET
//! let post = client.get::<Post>("/posts/1", None).await?;
//! println!("{}: {}", post.data.id, post.data.title);
//!
//! // Query parameters and per-call headers
//! let options = RequestOptions::builder()
//!     .param("userId", 1)
//!     .header("Accept-Language", "en")
//!     .build();
//! let posts = client.get::<Vec<Post>>("/posts", Some(options)).await?;
//!
//! // Generic request with a method string
//! let config = RequestConfig::builder("/posts/1").method("DELETE").build();
//! client.request::<serde_json::Value>(config).await?;
//! ```
//!
//! ## Interceptors
//!
//! ```rust,ignore
//! use brex_axios::clients::{HttpError, InterceptorError};
//!
//! // Runs after default headers are merged, before dispatch
//! client.interceptors().request.register(|mut parts| async move {
//!     parts.headers.insert("Authorization".to_string(), "Bearer token".to_string());
//!     Ok(parts)
//! });
//!
//! // Success handlers fold in order; the first error handler settles failures
//! client.interceptors().response.register_with_error(
//!     |response| async move { Ok(response) },
//!     |error: HttpError| async move {
//!         Err(InterceptorError::new(format!("request failed: {error}")).into())
//!     },
//! );
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and interceptors are per client
//! - **Fail-fast validation**: Newtypes and builders validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, ClientConfig, ClientConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    AxiosStyleClient, HttpError, HttpMethod, HttpResponse, RequestConfig, RequestOptions,
    ReqwestTransport, SimpleClient,
};
