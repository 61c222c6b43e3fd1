//! Hand-written host fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    ConnectivityStatus, ConnectionType, Directory, DocumentStore, DownloadTrigger, FixedBridge,
    HttpClient, HttpRequest, HttpResponse, NetworkMonitor, Notifier, PlatformName, ShareRequest,
    ShareSheet, ToastDuration, WrittenFile,
};
use bytes::Bytes;
use core_client::{ClientConfig, NativeCapabilities, SheetClient};
use serde_json::Value;

type Responder = dyn Fn(&HttpRequest) -> BridgeResult<HttpResponse> + Send + Sync;

/// HTTP fake answering from a closure and remembering every request.
pub struct ScriptedHttp {
    requests: Mutex<Vec<HttpRequest>>,
    responder: Box<Responder>,
}

impl ScriptedHttp {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> BridgeResult<HttpResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Every request answered with `status` and `body`.
    pub fn json(status: u16, body: Value) -> Arc<Self> {
        Self::new(move |_| Ok(json_response(status, &body)))
    }

    pub fn failing(error: fn() -> BridgeError) -> Arc<Self> {
        Self::new(move |_| Err(error()))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_url(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|r| r.url.clone())
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        let answer = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        answer
    }
}

pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
        body: Bytes::from(body.to_string()),
    }
}

pub fn binary_response(bytes: &'static [u8]) -> HttpResponse {
    HttpResponse {
        status: 200,
        headers: HashMap::new(),
        body: Bytes::from_static(bytes),
    }
}

/// HTTP fake that never answers.
pub struct NeverResponds;

#[async_trait]
impl HttpClient for NeverResponds {
    async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
        std::future::pending().await
    }
}

/// Monitor whose answer can be flipped mid-test.
pub struct SwitchMonitor {
    online: Mutex<bool>,
    queries: AtomicUsize,
}

impl SwitchMonitor {
    pub fn new(online: bool) -> Arc<Self> {
        Arc::new(Self {
            online: Mutex::new(online),
            queries: AtomicUsize::new(0),
        })
    }

    pub fn set_online(&self, online: bool) {
        *self.online.lock().unwrap() = online;
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NetworkMonitor for SwitchMonitor {
    async fn get_status(&self) -> BridgeResult<ConnectivityStatus> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if *self.online.lock().unwrap() {
            Ok(ConnectivityStatus::online(ConnectionType::Wifi))
        } else {
            Ok(ConnectivityStatus::offline())
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    shown: Mutex<Vec<(String, ToastDuration)>>,
}

impl RecordingNotifier {
    pub fn texts(&self) -> Vec<String> {
        self.shown.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn shown(&self) -> Vec<(String, ToastDuration)> {
        self.shown.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn show(&self, text: &str, duration: ToastDuration) -> BridgeResult<()> {
        self.shown.lock().unwrap().push((text.to_string(), duration));
        Ok(())
    }
}

/// Notifier that rejects every toast.
#[derive(Default)]
pub struct BrokenNotifier {
    attempts: AtomicUsize,
}

impl BrokenNotifier {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for BrokenNotifier {
    async fn show(&self, _text: &str, _duration: ToastDuration) -> BridgeResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(BridgeError::OperationFailed("toast plugin missing".into()))
    }
}

#[derive(Default)]
pub struct CountingDownloader {
    pub downloads: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl DownloadTrigger for CountingDownloader {
    async fn trigger_download(&self, filename: &str, bytes: Bytes) -> BridgeResult<String> {
        self.downloads.lock().unwrap().push((filename.to_string(), bytes.len()));
        Ok(format!("blob:http://localhost/{}", filename))
    }
}

/// Ordered record of host calls shared between fakes.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

#[derive(Default)]
pub struct CountingStore {
    pub writes: Mutex<Vec<(String, String, Directory)>>,
    pub log: CallLog,
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn write_base64(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> BridgeResult<WrittenFile> {
        self.log.lock().unwrap().push("write");
        self.writes
            .lock()
            .unwrap()
            .push((path.to_string(), data.to_string(), directory));
        Ok(WrittenFile {
            uri: format!("file:///documents/{}", path),
        })
    }
}

#[derive(Default)]
pub struct CountingShare {
    pub requests: Mutex<Vec<ShareRequest>>,
    pub log: CallLog,
}

#[async_trait]
impl ShareSheet for CountingShare {
    async fn share(&self, request: ShareRequest) -> BridgeResult<()> {
        self.log.lock().unwrap().push("share");
        self.requests.lock().unwrap().push(request);
        Ok(())
    }
}

/// Everything a native-shell client is wired to, kept for assertions.
pub struct NativeHost {
    /// Store and share calls, in the order they happened
    pub calls: CallLog,
    pub monitor: Arc<SwitchMonitor>,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<CountingStore>,
    pub share: Arc<CountingShare>,
    pub downloader: Arc<CountingDownloader>,
}

impl NativeHost {
    pub fn new(online: bool) -> Self {
        let calls = CallLog::default();
        Self {
            monitor: SwitchMonitor::new(online),
            notifier: Arc::new(RecordingNotifier::default()),
            store: Arc::new(CountingStore {
                log: calls.clone(),
                ..CountingStore::default()
            }),
            share: Arc::new(CountingShare {
                log: calls.clone(),
                ..CountingShare::default()
            }),
            calls,
            downloader: Arc::new(CountingDownloader::default()),
        }
    }

    pub fn client(&self, http: Arc<dyn HttpClient>) -> SheetClient {
        self.client_with_notifier(http, self.notifier.clone())
    }

    pub fn client_with_notifier(
        &self,
        http: Arc<dyn HttpClient>,
        notifier: Arc<dyn Notifier>,
    ) -> SheetClient {
        let config = ClientConfig::builder()
            .global_bridge(Arc::new(FixedBridge::new(PlatformName::Android)))
            .http_client(http)
            .downloader(self.downloader.clone())
            .native_capabilities(NativeCapabilities {
                network_monitor: self.monitor.clone(),
                notifier,
                document_store: self.store.clone(),
                share_sheet: self.share.clone(),
            })
            .build()
            .unwrap();
        SheetClient::new(config).unwrap()
    }
}

/// Browser client with no host bridge at all.
pub fn web_client(
    http: Arc<dyn HttpClient>,
    downloader: Arc<CountingDownloader>,
) -> SheetClient {
    let config = ClientConfig::builder()
        .http_client(http)
        .downloader(downloader)
        .build()
        .unwrap();
    SheetClient::new(config).unwrap()
}

/// Let detached toast tasks run.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub fn table_body() -> Value {
    serde_json::json!({
        "success": true,
        "message": "File uploaded successfully",
        "data": {
            "data": [{ "id": 0, "Name": "Alice", "Price": 10 }],
            "columns": [
                { "field": "Name", "headerName": "Name", "editable": true },
                { "field": "Price", "headerName": "Price", "editable": true }
            ],
            "rowCount": 1,
            "colCount": 2
        }
    })
}
