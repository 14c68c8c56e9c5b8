//! HTTP transport abstraction and the reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

use super::client::HTTP_CLIENT;

/// Errors raised when no response could be obtained
#[derive(Debug, Error)]
pub enum TransportError {
    /// Error reported by the reqwest client (connect, DNS, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection-level failure reported by a non-reqwest transport
    #[error("Connection failed: {message}")]
    Connection { message: String },
}

impl TransportError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

/// Outgoing request handed to a transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body
    pub body: Value,
}

/// Response obtained from the downstream service
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    /// Parsed body: JSON when possible, a JSON string otherwise, `null` when empty
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }
}

/// Capability to POST a JSON request and hand back whatever came back
///
/// Implementations return `Ok` for every response they obtain, whatever its
/// status code, and `Err` only when no response exists at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}

/// Transport backed by a `reqwest::Client`
///
/// Uses the global `HTTP_CLIENT` unless a client is supplied.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .json(&request.body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        Ok(HttpResponse {
            status,
            body: parse_body(&bytes),
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
