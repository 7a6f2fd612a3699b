//! The `HttpTransport` trait is the seam between the executor and the wire.
//!
//! Production code uses [`ReqwestTransport`](crate::rest::ReqwestTransport);
//! tests plug in scripted doubles that return canned responses, errors, or
//! panic outright.

use std::time::Duration;

use async_trait::async_trait;

/// One outbound GET, fully described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body text of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Transport-level failure: no usable HTTP response came back.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be established or was dropped.  The string
    /// carries the full error chain so callers can sub-classify it.
    #[error("connect: {0}")]
    Connect(String),

    #[error("timeout")]
    Timeout,

    /// Anything else the transport reports (request building, body
    /// decoding, redirects, ...).
    #[error("{type_name}: {message}")]
    Other { type_name: String, message: String },
}

/// Abstraction over "send one GET and give me status + text".
///
/// Implementations must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}
