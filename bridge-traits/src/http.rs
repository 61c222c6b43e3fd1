//! HTTP Client Abstraction
//!
//! Provides async HTTP dispatch with per-request timeouts, JSON and multipart
//! bodies, and optional upload progress reporting.

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    error::{BridgeError, Result},
    platform::PlatformSendSync,
};

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

/// A single file sent as one part of a `multipart/form-data` body.
#[derive(Debug, Clone)]
pub struct MultipartFile {
    /// Form field name (the backend expects `file`)
    pub field_name: String,
    /// File name reported to the server
    pub file_name: String,
    /// Optional MIME type of the part
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Request body variants understood by every `HttpClient`.
#[derive(Debug, Clone)]
pub enum HttpBody {
    /// Raw bytes, sent as-is with whatever `Content-Type` header was set
    Bytes(Bytes),
    /// Multipart form with a single file part
    Multipart(MultipartFile),
}

/// Callback receiving `(bytes_sent, total_bytes)` while a body is uploaded.
#[derive(Clone)]
pub struct ProgressCallback(Arc<dyn Fn(u64, u64) + Send + Sync>);

impl ProgressCallback {
    pub fn new(callback: impl Fn(u64, u64) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn report(&self, sent: u64, total: u64) {
        (self.0)(sent, total)
    }
}

impl fmt::Debug for ProgressCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProgressCallback { .. }")
    }
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<HttpBody>,
    pub timeout: Option<Duration>,
    pub progress: Option<ProgressCallback>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
            progress: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let json = serde_json::to_vec(body).map_err(|e| {
            BridgeError::InvalidRequest(format!("JSON serialization failed: {}", e))
        })?;
        self.body = Some(HttpBody::Bytes(Bytes::from(json)));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(HttpBody::Bytes(body));
        self
    }

    /// Attach a multipart body. The client sets the boundary header itself.
    pub fn multipart(mut self, file: MultipartFile) -> Self {
        self.headers.remove("Content-Type");
        self.body = Some(HttpBody::Multipart(file));
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }
}

/// HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Parse response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            BridgeError::OperationFailed(format!("JSON deserialization failed: {}", e))
        })
    }

    /// Get response body as UTF-8 string
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid UTF-8: {}", e)))
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async HTTP client trait
///
/// Implementations dispatch one request and hand back whatever the server
/// answered, including non-2xx statuses. They must not retry. Failures that
/// happen before a response exists are classified:
///
/// - [`BridgeError::Timeout`] when `request.timeout` elapsed
/// - [`BridgeError::NoResponse`] when the request went out but nothing came back
/// - [`BridgeError::InvalidRequest`] when the request could not be built
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn fetch_status(client: &dyn HttpClient) -> Result<String> {
///     let request = HttpRequest::new(HttpMethod::Get, "http://localhost:5000/api/status");
///     let response = client.execute(request).await?;
///     response.text()
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait HttpClient: PlatformSendSync {
    /// Execute an HTTP request
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_http_request_builder() {
        let request = HttpRequest::new(HttpMethod::Post, "http://localhost:5000/api/ai-command")
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "command": "sum column Price" }))
            .unwrap()
            .timeout(Duration::from_secs(30));

        assert_eq!(request.url, "http://localhost:5000/api/ai-command");
        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(request.timeout, Some(Duration::from_secs(30)));
        assert!(matches!(request.body, Some(HttpBody::Bytes(_))));
    }

    #[test]
    fn test_multipart_drops_json_content_type() {
        let request = HttpRequest::new(HttpMethod::Post, "http://localhost:5000/api/upload")
            .header("Content-Type", "application/json")
            .multipart(MultipartFile {
                field_name: "file".to_string(),
                file_name: "sales.csv".to_string(),
                content_type: Some("text/csv".to_string()),
                data: Bytes::from_static(b"a,b\n1,2\n"),
            });

        assert!(!request.headers.contains_key("Content-Type"));
        match request.body {
            Some(HttpBody::Multipart(file)) => assert_eq!(file.file_name, "sales.csv"),
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[test]
    fn test_progress_callback_reports() {
        let seen = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&seen);
        let callback = ProgressCallback::new(move |sent, _total| {
            sink.store(sent, Ordering::SeqCst);
        });

        callback.report(42, 100);
        assert_eq!(seen.load(Ordering::SeqCst), 42);
        assert_eq!(format!("{:?}", callback), "ProgressCallback { .. }");
    }

    #[test]
    fn test_http_response_status_checks() {
        let response = HttpResponse {
            status: 404,
            headers: HashMap::new(),
            body: Bytes::from(r#"{"error":"No data loaded"}"#),
        };

        assert!(!response.is_success());
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["error"], "No data loaded");
    }
}
