//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartFile},
    ProgressCallback,
};
use bytes::Bytes;
use futures_util::stream;
use reqwest::{
    multipart::{Form, Part},
    Body, Client,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Upload bodies are streamed in chunks of this size so progress can be reported
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Reqwest-based HTTP client implementation
///
/// Dispatches exactly once per call (no retries) and classifies transport
/// failures into `Timeout`, `NoResponse` and `InvalidRequest`.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with a 30 second default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom default timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("sheet-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BridgeError::NotAvailable(format!("HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }

    /// Stream `data` in chunks, reporting `(sent, total)` as each chunk is pulled
    fn progress_body(data: Bytes, progress: Option<ProgressCallback>) -> Body {
        let Some(progress) = progress else {
            return Body::from(data);
        };

        let total = data.len() as u64;
        if total == 0 {
            progress.report(0, 0);
            return Body::from(data);
        }

        let chunks: Vec<Bytes> = (0..data.len())
            .step_by(UPLOAD_CHUNK_SIZE)
            .map(|start| data.slice(start..(start + UPLOAD_CHUNK_SIZE).min(data.len())))
            .collect();

        let mut sent = 0u64;
        let chunks = stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            progress.report(sent, total);
            Ok::<Bytes, std::io::Error>(chunk)
        }));

        Body::wrap_stream(chunks)
    }

    fn build_form(file: MultipartFile, progress: Option<ProgressCallback>) -> Result<Form> {
        let length = file.data.len() as u64;
        let mut part = Part::stream_with_length(Self::progress_body(file.data, progress), length)
            .file_name(file.file_name);

        if let Some(content_type) = file.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|e| {
                BridgeError::InvalidRequest(format!("Invalid content type {}: {}", content_type, e))
            })?;
        }

        Ok(Form::new().part(file.field_name, part))
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: HttpRequest) -> Result<reqwest::RequestBuilder> {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }

        req = match request.body {
            Some(HttpBody::Bytes(body)) => req.body(Self::progress_body(body, request.progress)),
            Some(HttpBody::Multipart(file)) => req.multipart(Self::build_form(file, request.progress)?),
            None => req,
        };

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        Ok(req)
    }

    /// Map a reqwest failure onto the bridge taxonomy
    fn classify(error: reqwest::Error) -> BridgeError {
        if error.is_timeout() {
            BridgeError::Timeout(error.to_string())
        } else if error.is_builder() {
            BridgeError::InvalidRequest(error.to_string())
        } else {
            BridgeError::NoResponse(error.to_string())
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method;
        let url = request.url.clone();
        debug!(method = method.as_str(), url = %url, "Executing HTTP request");

        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, url = %url, "HTTP request failed");
                Self::classify(e)
            })?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response.bytes().await.map_err(Self::classify)?;

        debug!(status, size = body.len(), url = %url, "HTTP response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
