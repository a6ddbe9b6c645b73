//! Transport abstraction for Orion Publish.
//!
//! This module provides a pluggable request/response layer that abstracts
//! the HTTP client (reqwest, mock for testing).
//!
//! # Design
//!
//! One call is one request: `request()` sends a method, URL and optional
//! JSON body and resolves to the status and decoded JSON body. Statuses are
//! not interpreted here; the gateway decides what counts as failure.
//! Retries and timeouts belong to the implementation.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new();
//! transport.queue_json(200, json!({"post": {"id": "p1", "token": "t1"}}));
//! let response = transport.request(HttpRequest::new(Method::Post, url, body)).await?;
//! ```

mod http;
mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the service.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The request failed for another reason.
    #[error("request failed: {0}")]
    RequestFailed(String),
}

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// An outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Create a request with a JSON body.
    pub fn new(method: Method, url: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// A response from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body; `None` when empty or not JSON.
    pub body: Option<Value>,
}

impl HttpResponse {
    /// Create a response.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Statuses below 400 are successes.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Transport trait for talking to the publishing service.
///
/// Implementations handle the underlying connection mechanism
/// (reqwest, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request and return the response, whatever its status.
    ///
    /// Errors only when no response was obtained.
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
