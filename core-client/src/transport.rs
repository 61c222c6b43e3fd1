//! HTTP dispatch with a fixed deadline and failure classification.
//!
//! Every request carries [`REQUEST_TIMEOUT`] and the dispatch future is also
//! raced against it, so an HTTP capability that never resolves still fails
//! with [`ClientError::Timeout`]. No request is ever retried.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use bridge_traits::http::{
    HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartFile, ProgressCallback,
};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::envelope::{failure_reason_from_body, ApiResponse, UploadFile};
use crate::error::{ClientError, Result};
use crate::runtime;

/// Deadline applied to every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Multipart field the backend reads the upload from
pub const UPLOAD_FIELD: &str = "file";

/// Caller-facing upload progress, in whole percent (0-100).
#[derive(Clone)]
pub struct UploadProgress(Arc<dyn Fn(u8) + Send + Sync>);

impl UploadProgress {
    pub fn new(callback: impl Fn(u8) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invoke the callback. A panic inside it is contained and logged.
    pub fn report(&self, percent: u8) {
        if panic::catch_unwind(AssertUnwindSafe(|| (self.0)(percent))).is_err() {
            debug!(percent, "Upload progress callback panicked");
        }
    }
}

impl fmt::Debug for UploadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UploadProgress { .. }")
    }
}

/// `round(loaded * 100 / total)`, capped at 100. `None` when `total` is zero.
pub fn progress_percent(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let percent = (loaded as f64 * 100.0 / total as f64).round();
    Some(percent.clamp(0.0, 100.0) as u8)
}

/// Request body accepted by [`TransportClient::send`].
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Upload(UploadFile),
}

/// How a 2xx body should be handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Json,
    Binary,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportReply {
    Json(Value),
    Binary(Bytes),
}

/// Sends requests to the resolved API base URL.
#[derive(Clone)]
pub struct TransportClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
    is_mobile: bool,
}

impl TransportClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>, is_mobile: bool) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            is_mobile,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Dispatch one request and classify the outcome.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        kind: ReplyKind,
        progress: Option<UploadProgress>,
    ) -> Result<TransportReply> {
        let request = self.build_request(method, path, body, progress)?;

        debug!(method = method.as_str(), path, "Dispatching request");
        let response = match runtime::timeout(REQUEST_TIMEOUT, self.http.execute(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                let error = ClientError::from_dispatch(err, self.is_mobile);
                warn!(method = method.as_str(), path, kind = ?error.kind(), "Request failed: {}", error);
                return Err(error);
            }
            Err(runtime::Elapsed) => {
                warn!(method = method.as_str(), path, "Request exceeded {:?}", REQUEST_TIMEOUT);
                return Err(ClientError::Timeout);
            }
        };

        debug!(path, status = response.status, size = response.body.len(), "Response received");

        if !response.is_success() {
            let reason = server_failure_reason(&response);
            warn!(path, status = response.status, "Server rejected request: {}", reason);
            return Err(ClientError::Server(reason));
        }

        match kind {
            ReplyKind::Binary => Ok(TransportReply::Binary(response.body)),
            ReplyKind::Json => serde_json::from_slice(&response.body)
                .map(TransportReply::Json)
                .map_err(|err| {
                    warn!(path, error = %err, "Response body is not JSON");
                    ClientError::Server(format!("Malformed response from server: {}", err))
                }),
        }
    }

    /// `GET` a JSON envelope.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        let reply = self
            .send(HttpMethod::Get, path, RequestBody::Empty, ReplyKind::Json, None)
            .await?;
        decode_envelope(path, reply)
    }

    /// `POST` a JSON body and decode the JSON envelope.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        let reply = self
            .send(HttpMethod::Post, path, RequestBody::Json(body), ReplyKind::Json, None)
            .await?;
        decode_envelope(path, reply)
    }

    /// `POST` a JSON body and return the raw response bytes.
    pub async fn post_for_bytes<B>(&self, path: &str, body: &B) -> Result<Bytes>
    where
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        match self
            .send(HttpMethod::Post, path, RequestBody::Json(body), ReplyKind::Binary, None)
            .await?
        {
            TransportReply::Binary(bytes) => Ok(bytes),
            TransportReply::Json(value) => Ok(Bytes::from(value.to_string())),
        }
    }

    /// Multipart upload under the `file` field.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file: UploadFile,
        progress: Option<UploadProgress>,
    ) -> Result<ApiResponse<T>> {
        let reply = self
            .send(HttpMethod::Post, path, RequestBody::Upload(file), ReplyKind::Json, progress)
            .await?;
        decode_envelope(path, reply)
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        progress: Option<UploadProgress>,
    ) -> Result<HttpRequest> {
        let request = HttpRequest::new(method, self.url(path))
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request
                .json(&value)
                .map_err(|err| ClientError::from_dispatch(err, self.is_mobile))?,
            RequestBody::Upload(file) => request.multipart(MultipartFile {
                field_name: UPLOAD_FIELD.to_string(),
                file_name: file.filename,
                content_type: file.content_type,
                data: file.bytes,
            }),
        };

        Ok(match progress {
            Some(progress) => request.on_progress(ProgressCallback::new(move |loaded, total| {
                if let Some(percent) = progress_percent(loaded, total) {
                    progress.report(percent);
                }
            })),
            None => request,
        })
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|err| ClientError::Config {
        detail: format!("JSON serialization failed: {}", err),
    })
}

fn decode_envelope<T: DeserializeOwned>(path: &str, reply: TransportReply) -> Result<ApiResponse<T>> {
    let TransportReply::Json(value) = reply else {
        return Err(ClientError::Server("Unexpected binary response".to_string()));
    };

    ApiResponse::from_value(value).map_err(|err| {
        warn!(path, error = %err, "Unexpected response envelope");
        ClientError::Server(format!("Malformed response from server: {}", err))
    })
}

fn server_failure_reason(response: &HttpResponse) -> String {
    match serde_json::from_slice::<Value>(&response.body) {
        Ok(body) => failure_reason_from_body(&body),
        Err(_) => failure_reason_from_body(&Value::Null),
    }
}
