//! Convenience helper for wiring the browser bridges together.
//!
//! Mirrors the role `bridge-desktop` plays for native targets: one call
//! returns every capability the page can provide. Inside a native shell the
//! native-only ones are the Capacitor plugins; in a plain browser they are
//! the web fallbacks.

use std::sync::Arc;

use bridge_traits::{
    bridge::NativeBridge,
    download::DownloadTrigger,
    error::Result as BridgeResult,
    fallback::{AlwaysOnline, SilentNotifier, UnavailableDocumentStore, UnavailableShareSheet},
    http::HttpClient,
    network::NetworkMonitor,
    notification::Notifier,
    share::ShareSheet,
    storage::DocumentStore,
};

use tracing::debug;

use crate::{
    bridge::CapacitorGlobalBridge,
    download::BrowserDownloader,
    http::WasmHttpClient,
    plugins::{CapacitorFilesystem, CapacitorNetworkMonitor, CapacitorShare, CapacitorToast},
};

/// Fully constructed browser capabilities ready for injection into the client.
pub struct WebBridgeSet {
    /// HTTP client powered by browser `fetch`.
    pub http_client: Arc<dyn HttpClient>,
    /// `window.Capacitor` probe.
    pub global_bridge: Arc<dyn NativeBridge>,
    /// Blob + anchor downloader.
    pub downloader: Arc<dyn DownloadTrigger>,
    /// `Network` plugin, or always online.
    pub network_monitor: Arc<dyn NetworkMonitor>,
    /// `Toast` plugin, or no-op toasts.
    pub notifier: Arc<dyn Notifier>,
    /// `Filesystem` plugin, or a rejecting store.
    pub document_store: Arc<dyn DocumentStore>,
    /// `Share` plugin, or a rejecting share sheet.
    pub share_sheet: Arc<dyn ShareSheet>,
}

/// Build every browser capability for the current window.
pub fn build_web_bridges() -> BridgeResult<WebBridgeSet> {
    let global_bridge = CapacitorGlobalBridge::new();
    let native = global_bridge.is_native_platform().unwrap_or(false);
    debug!(native, "Selecting browser capabilities");

    let (network_monitor, notifier, document_store, share_sheet): (
        Arc<dyn NetworkMonitor>,
        Arc<dyn Notifier>,
        Arc<dyn DocumentStore>,
        Arc<dyn ShareSheet>,
    ) = if native {
        (
            Arc::new(CapacitorNetworkMonitor),
            Arc::new(CapacitorToast),
            Arc::new(CapacitorFilesystem),
            Arc::new(CapacitorShare),
        )
    } else {
        (
            Arc::new(AlwaysOnline),
            Arc::new(SilentNotifier),
            Arc::new(UnavailableDocumentStore),
            Arc::new(UnavailableShareSheet),
        )
    };

    Ok(WebBridgeSet {
        http_client: Arc::new(WasmHttpClient::new()?),
        global_bridge: Arc::new(global_bridge),
        downloader: Arc::new(BrowserDownloader::new()),
        network_monitor,
        notifier,
        document_store,
        share_sheet,
    })
}
