//! HTTP Client Abstraction
//!
//! Thin async HTTP seam so remote adapters stay testable without a network.
//! Only the verbs the relay actually speaks are modeled.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::error::{RemoteError, Result};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
}

/// HTTP request builder
///
/// Headers keep insertion order; a name set twice keeps the later value.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| *existing != name);
        self.headers.push((name, value.into()));
        self
    }

    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.into()))
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<T: Serialize>(self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body)
            .map_err(|e| RemoteError::InvalidPayload(format!("request body: {}", e)))?;
        let mut request = self.header("Content-Type", "application/json");
        request.body = Some(Bytes::from(json));
        Ok(request)
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Look up a header by exact name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| RemoteError::InvalidPayload(format!("response body: {}", e)))
    }

    /// Response body as text (lossy UTF-8)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client trait
///
/// Implementations execute a single attempt. Transient failures are NOT
/// retried here: the poll loop treats them as a no-op for the affected key
/// and re-reads on the next cycle.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request.
    ///
    /// Non-2xx statuses are returned as responses, not errors; the caller
    /// decides what a given status means for its protocol. Errors are
    /// reserved for the transport itself (timeout, connect failure).
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::new(HttpMethod::Get, "https://example.com")
            .bearer_token("secret")
            .header("Accept", "application/json")
            .timeout(Duration::from_secs(5));

        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.header_value("Authorization"), Some("Bearer secret"));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_repeated_header_keeps_last_value() {
        let request = HttpRequest::new(HttpMethod::Get, "https://example.com")
            .header("Accept", "text/plain")
            .header("Accept", "application/json");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header_value("Accept"), Some("application/json"));
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = HttpRequest::new(HttpMethod::Put, "https://example.com")
            .json(&serde_json::json!({ "value": "x" }))
            .unwrap();

        assert_eq!(request.header_value("Content-Type"), Some("application/json"));
        assert_eq!(request.body.unwrap(), Bytes::from(r#"{"value":"x"}"#));
    }

    #[test]
    fn test_response_helpers() {
        let response = HttpResponse {
            status: 404,
            body: Bytes::from("missing"),
        };

        assert!(!response.is_success());
        assert_eq!(response.text(), "missing");
        assert!(response.json::<serde_json::Value>().is_err());
    }
}
