//! Public façade over the network-access layer.
//!
//! Every gated operation runs the same sequence: connectivity pre-flight
//! (native only), optional start toast, dispatch, outcome toast. Failures
//! are logged and returned to the caller unchanged.

use std::sync::Arc;

use bridge_traits::notification::ToastDuration;
use core_runtime::{config::ClientConfig, logging::strip_path};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::capabilities::PlatformCapabilities;
use crate::connectivity::ConnectivityGate;
use crate::endpoint::EndpointResolver;
use crate::envelope::{
    AiCommandRequest, ApiResponse, CellUpdate, ExportRequest, ServerStatus, TablePayload,
    UploadFile,
};
use crate::error::{ClientError, Result};
use crate::export::{ExportArtifact, ExportOutcome, ExportPipeline};
use crate::notify::{messages, NotificationSideChannel};
use crate::platform::{PlatformInfo, PlatformProbe};
use crate::transport::{TransportClient, UploadProgress};

/// Filename used when the caller does not name the export
pub const DEFAULT_EXPORT_FILENAME: &str = "export.xlsx";

struct ClientInner {
    probe: PlatformProbe,
    info: PlatformInfo,
    gate: ConnectivityGate,
    transport: TransportClient,
    notifications: NotificationSideChannel,
    export: ExportPipeline,
}

/// Spreadsheet backend client.
///
/// Cheap to clone; clones share the same immutable state.
///
/// ```ignore
/// use core_client::{SheetClient, UploadFile};
/// use core_runtime::config::ClientConfig;
///
/// let client = SheetClient::new(ClientConfig::from_env().build()?)?;
/// let table = client
///     .upload_file(UploadFile::new("sales.csv", bytes), None)
///     .await?;
/// ```
#[derive(Clone)]
pub struct SheetClient {
    inner: Arc<ClientInner>,
}

impl SheetClient {
    /// Detect the platform, resolve the endpoint and wire capabilities.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let probe = PlatformProbe::new(config.global_bridge.clone(), config.bundled_bridge.clone());
        let verdict = probe.verdict();
        let api_base_url =
            EndpointResolver::new(config.api_url_override.clone()).resolve(verdict.is_mobile);

        let capabilities = PlatformCapabilities::select(verdict, &config)?;

        let info = PlatformInfo {
            is_mobile: verdict.is_mobile,
            platform: verdict.platform,
            api_base_url: api_base_url.clone(),
        };
        info!(
            is_mobile = info.is_mobile,
            platform = %info.platform,
            api_base_url = %info.api_base_url,
            "Sheet client ready"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                probe,
                gate: ConnectivityGate::new(verdict.is_mobile, capabilities.network_monitor),
                transport: TransportClient::new(
                    capabilities.http_client,
                    api_base_url,
                    verdict.is_mobile,
                ),
                notifications: capabilities.notifications,
                export: capabilities.export,
                info,
            }),
        })
    }

    /// Client with desktop defaults and the `SHEET_API_URL` override.
    #[cfg(feature = "desktop-shims")]
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env().build()?)
    }

    /// Client wired to the browser: `fetch`, `window.Capacitor`, Blob downloads.
    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    pub fn for_browser() -> Result<Self> {
        let bridges = bridge_wasm::build_web_bridges().map_err(core_runtime::Error::from)?;
        let config = ClientConfig::builder()
            .global_bridge(bridges.global_bridge)
            .http_client(bridges.http_client)
            .downloader(bridges.downloader)
            .native_capabilities(core_runtime::config::NativeCapabilities {
                network_monitor: bridges.network_monitor,
                notifier: bridges.notifier,
                document_store: bridges.document_store,
                share_sheet: bridges.share_sheet,
            })
            .build()?;
        Self::new(config)
    }

    /// Platform facts computed at construction.
    pub fn platform_info(&self) -> PlatformInfo {
        self.inner.info.clone()
    }

    /// Run detection again against the same bridges.
    ///
    /// The client keeps using the construction-time verdict; this only
    /// reports what the bridges say now.
    pub fn redetect_platform(&self) -> PlatformInfo {
        let verdict = self.inner.probe.verdict();
        PlatformInfo {
            is_mobile: verdict.is_mobile,
            platform: verdict.platform,
            api_base_url: self.inner.info.api_base_url.clone(),
        }
    }

    /// Current connectivity; always `true` in web mode.
    pub async fn check_connectivity(&self) -> bool {
        self.inner.gate.check_connectivity().await
    }

    /// Upload a spreadsheet (`.xlsx`, `.xls`, `.csv`) and return the parsed table.
    #[instrument(skip(self, file, progress), fields(filename = %strip_path(&file.filename)))]
    pub async fn upload_file(
        &self,
        file: UploadFile,
        progress: Option<UploadProgress>,
    ) -> Result<ApiResponse<TablePayload>> {
        let outcome = async {
            self.preflight().await?;

            let relay = self.inner.notifications.progress_relay();
            let forward = UploadProgress::new(move |percent| {
                if let Some(listener) = &progress {
                    listener.report(percent);
                }
                if let Some(relay) = &relay {
                    let _ = relay.unbounded_send(percent);
                }
            });

            self.dispatch(self.inner.transport.upload("/upload", file, Some(forward)))
                .await
        }
        .await;

        match &outcome {
            Ok(_) => {
                info!("Upload completed");
                self.notify(messages::UPLOAD_DONE, ToastDuration::Short);
            }
            Err(err) => {
                warn!(kind = ?err.kind(), "Upload failed: {}", err);
                self.notify(messages::upload_failed(&err.to_string()), ToastDuration::Long);
            }
        }
        outcome
    }

    /// Fetch the current table.
    #[instrument(skip(self))]
    pub async fn get_data(&self) -> Result<ApiResponse<TablePayload>> {
        let outcome = async {
            self.preflight().await?;
            self.dispatch(self.inner.transport.get_json("/data")).await
        }
        .await;

        if let Err(err) = &outcome {
            warn!(kind = ?err.kind(), "Fetching data failed: {}", err);
        }
        outcome
    }

    /// Change one cell. `row_id` is the row's `id` field.
    #[instrument(skip(self, row_id, value))]
    pub async fn update_cell(
        &self,
        row_id: impl Into<Value>,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<ApiResponse<Value>> {
        let update = CellUpdate {
            row_id: row_id.into(),
            column: column.to_string(),
            value: value.into(),
        };

        let outcome = async {
            self.preflight().await?;
            self.dispatch(self.inner.transport.post_json("/update-cell", &update))
                .await
        }
        .await;

        match &outcome {
            Ok(_) => self.notify(messages::CELL_UPDATED, ToastDuration::Short),
            Err(err) => {
                warn!(kind = ?err.kind(), "Cell update failed: {}", err);
                self.notify(messages::update_failed(&err.to_string()), ToastDuration::Long);
            }
        }
        outcome
    }

    /// Send a natural-language command. Surrounding whitespace is trimmed.
    ///
    /// When the command changed the table, `data` carries the new snapshot
    /// and [`ApiResponse::refresh_needed`] is true.
    #[instrument(skip(self, command))]
    pub async fn process_ai_command(&self, command: &str) -> Result<ApiResponse<TablePayload>> {
        let request = AiCommandRequest {
            command: command.trim().to_string(),
        };

        let outcome = async {
            self.preflight().await?;
            self.notify(messages::AI_STARTED, ToastDuration::Short);
            self.dispatch(self.inner.transport.post_json("/ai-command", &request))
                .await
        }
        .await;

        match &outcome {
            Ok(response) if response.is_success() => {
                info!(operation = response.operation().unwrap_or("unknown"), "AI command executed");
                self.notify(messages::AI_DONE, ToastDuration::Short);
            }
            Ok(response) => {
                let reason = response.failure_reason().unwrap_or_default();
                info!(reason = %reason, "AI command declined");
            }
            Err(err) => {
                warn!(kind = ?err.kind(), "AI command failed: {}", err);
                self.notify(messages::ai_failed(&err.to_string()), ToastDuration::Long);
            }
        }
        outcome
    }

    /// Export the edited table and deliver it for the platform.
    ///
    /// Web: direct download. Mobile: saved to the documents directory, then
    /// handed to the share sheet.
    #[instrument(skip(self))]
    pub async fn export_file(&self, filename: Option<&str>) -> Result<ExportOutcome> {
        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_EXPORT_FILENAME)
            .to_string();

        let outcome = async {
            self.preflight().await?;
            self.notify(messages::EXPORT_STARTED, ToastDuration::Short);

            let request = ExportRequest {
                filename: filename.clone(),
            };
            let bytes = self
                .dispatch(self.inner.transport.post_for_bytes("/export", &request))
                .await?;

            self.inner
                .export
                .export(ExportArtifact {
                    filename_hint: filename.clone(),
                    bytes,
                })
                .await
        }
        .await;

        match &outcome {
            Ok(_) => self.notify(messages::EXPORT_SHARED, ToastDuration::Long),
            Err(err) => {
                warn!(kind = ?err.kind(), "Export failed: {}", err);
                self.notify(messages::export_failed(&err.to_string()), ToastDuration::Long);
            }
        }
        outcome
    }

    /// Backend health report.
    #[instrument(skip(self))]
    pub async fn get_status(&self) -> Result<ApiResponse<ServerStatus>> {
        let outcome = async {
            self.preflight().await?;
            self.dispatch(self.inner.transport.get_json("/status")).await
        }
        .await;

        if let Err(err) = &outcome {
            warn!(kind = ?err.kind(), "Status check failed: {}", err);
        }
        outcome
    }

    /// `true` when the device is online and `/status` answered.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> bool {
        if !self.check_connectivity().await {
            return false;
        }

        match self.inner.transport.get_json::<ServerStatus>("/status").await {
            Ok(_) => true,
            Err(err) => {
                warn!(kind = ?err.kind(), "Connection test failed: {}", err);
                false
            }
        }
    }

    async fn preflight(&self) -> Result<()> {
        let result = self.inner.gate.ensure_connected().await;
        if result.is_err() {
            self.notify(messages::NO_CONNECTION, ToastDuration::Long);
        }
        result
    }

    /// Await a transport call. A connection-level failure on a device that
    /// has meanwhile gone offline is reported as [`ClientError::NoConnectivity`].
    async fn dispatch<T>(
        &self,
        call: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        match call.await {
            Err(err) if err.is_connection_error() && self.inner.info.is_mobile => {
                if self.inner.gate.check_connectivity().await {
                    Err(err)
                } else {
                    self.notify(messages::NO_CONNECTION, ToastDuration::Long);
                    Err(ClientError::NoConnectivity)
                }
            }
            other => other,
        }
    }

    fn notify(&self, text: impl Into<String>, duration: ToastDuration) {
        self.inner.notifications.notify(text, duration);
    }
}

impl std::fmt::Debug for SheetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetClient")
            .field("platform", &self.inner.info)
            .finish()
    }
}
