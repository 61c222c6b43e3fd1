//! # Client Configuration Module
//!
//! Provides configuration management for the sheet client.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `ClientConfig` holding every capability the client consumes plus the
//! optional base URL override. It enforces fail-fast validation so a missing
//! bridge is reported at construction time instead of on the first request.
//!
//! ## Required Dependencies
//!
//! - `HttpClient` - request dispatch (desktop default: reqwest)
//! - `DownloadTrigger` - web-mode export (desktop default: downloads directory)
//!
//! ## Optional Dependencies
//!
//! - Global and bundled `NativeBridge` probes - platform detection; without
//!   either, the client runs in web mode
//! - [`NativeCapabilities`] - network monitor, toasts, document store and
//!   share sheet; required once the probe reports a native platform
//!
//! When the `desktop-shims` feature is enabled, desktop defaults from
//! `bridge-desktop` are injected for every capability that was not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ```ignore
//! use bridge_traits::{FixedBridge, PlatformName};
//! use core_runtime::config::{ClientConfig, NativeCapabilities};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::builder()
//!     .global_bridge(Arc::new(FixedBridge::new(PlatformName::Android)))
//!     .http_client(Arc::new(MyHttpClient))
//!     .downloader(Arc::new(MyDownloader))
//!     .native_capabilities(NativeCapabilities {
//!         network_monitor: Arc::new(MyNetworkPlugin),
//!         notifier: Arc::new(MyToastPlugin),
//!         document_store: Arc::new(MyFilesystemPlugin),
//!         share_sheet: Arc::new(MySharePlugin),
//!     })
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{
    DocumentStore, DownloadTrigger, HttpClient, NativeBridge, NetworkMonitor, Notifier, ShareSheet,
};
use std::sync::Arc;

/// Environment variable overriding the web-mode API base URL
pub const API_URL_ENV: &str = "SHEET_API_URL";

/// Capabilities only a native shell provides.
///
/// Web mode never consults these; the client substitutes the web fallbacks.
#[derive(Clone)]
pub struct NativeCapabilities {
    /// Connectivity pre-flight
    pub network_monitor: Arc<dyn NetworkMonitor>,
    /// Toast feedback
    pub notifier: Arc<dyn Notifier>,
    /// Export persistence in the documents directory
    pub document_store: Arc<dyn DocumentStore>,
    /// OS share dialog
    pub share_sheet: Arc<dyn ShareSheet>,
}

impl std::fmt::Debug for NativeCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeCapabilities")
            .field("network_monitor", &"NetworkMonitor { ... }")
            .field("notifier", &"Notifier { ... }")
            .field("document_store", &"DocumentStore { ... }")
            .field("share_sheet", &"ShareSheet { ... }")
            .finish()
    }
}

/// Configuration for the sheet client.
///
/// Use [`ClientConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct ClientConfig {
    /// Web-mode base URL replacing the localhost default (no trailing slash)
    pub api_url_override: Option<String>,

    /// Host-injected global marker (`window.Capacitor` in a browser)
    pub global_bridge: Option<Arc<dyn NativeBridge>>,

    /// Locally bundled bridge module, consulted when the global one is silent
    pub bundled_bridge: Option<Arc<dyn NativeBridge>>,

    /// HTTP client for every request
    pub http_client: Arc<dyn HttpClient>,

    /// Native-only capabilities, when the host has them
    pub native: Option<NativeCapabilities>,

    /// Direct download used by web-mode exports
    pub downloader: Arc<dyn DownloadTrigger>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url_override", &self.api_url_override)
            .field(
                "global_bridge",
                &self.global_bridge.as_ref().map(|_| "NativeBridge { ... }"),
            )
            .field(
                "bundled_bridge",
                &self.bundled_bridge.as_ref().map(|_| "NativeBridge { ... }"),
            )
            .field("http_client", &"HttpClient { ... }")
            .field("native", &self.native)
            .field("downloader", &"DownloadTrigger { ... }")
            .finish()
    }
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Builder pre-filled with the `SHEET_API_URL` override, when set.
    pub fn from_env() -> ClientConfigBuilder {
        Self::builder().api_url_from(|key| std::env::var(key).ok())
    }
}

/// Check that `raw` is an absolute http(s) URL and drop trailing slashes.
pub fn normalize_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: "URL is empty".to_string(),
        });
    }

    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| Error::InvalidUrl {
            url: raw.to_string(),
            reason: "scheme must be http or https".to_string(),
        })?;

    if rest.trim_end_matches('/').is_empty() {
        return Err(Error::InvalidUrl {
            url: raw.to_string(),
            reason: "host is missing".to_string(),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for every request. \
                 Desktop: enable the 'desktop-shims' feature to use the default ReqwestHttpClient. \
                 Web: inject the fetch client from bridge-wasm. \
                 Mobile: inject the shell's HTTP plugin or the desktop client."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn downloader_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "DownloadTrigger".to_string(),
        message: "DownloadTrigger implementation is required for web-mode exports. \
                 Desktop: enable the 'desktop-shims' feature to save into the downloads directory. \
                 Web: inject the browser downloader from bridge-wasm."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_downloader() -> Result<Arc<dyn DownloadTrigger>> {
    use bridge_desktop::DirectoryDownloader;

    let downloader: Arc<dyn DownloadTrigger> = Arc::new(DirectoryDownloader::new());
    Ok(downloader)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_downloader() -> Result<Arc<dyn DownloadTrigger>> {
    Err(downloader_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_native() -> Option<NativeCapabilities> {
    use bridge_desktop::{
        DesktopNetworkMonitor, LoggingShareSheet, TokioDocumentStore, TracingNotifier,
    };

    Some(NativeCapabilities {
        network_monitor: Arc::new(DesktopNetworkMonitor::new()),
        notifier: Arc::new(TracingNotifier),
        document_store: Arc::new(TokioDocumentStore::new()),
        share_sheet: Arc::new(LoggingShareSheet),
    })
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_native() -> Option<NativeCapabilities> {
    None
}

/// Builder for constructing [`ClientConfig`] instances.
///
/// Set what the host provides, then call
/// [`build()`](ClientConfigBuilder::build). Missing required capabilities
/// produce [`Error::CapabilityMissing`] with a hint on how to supply them.
#[derive(Default)]
pub struct ClientConfigBuilder {
    api_url_override: Option<String>,
    global_bridge: Option<Arc<dyn NativeBridge>>,
    bundled_bridge: Option<Arc<dyn NativeBridge>>,
    http_client: Option<Arc<dyn HttpClient>>,
    native: Option<NativeCapabilities>,
    downloader: Option<Arc<dyn DownloadTrigger>>,
}

impl ClientConfigBuilder {
    /// Sets the web-mode base URL, e.g. `https://sheets.example.com/api`.
    ///
    /// Native builds ignore the override and use the device candidates.
    pub fn api_url_override(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Reads the override from `lookup(SHEET_API_URL)`. Blank values are ignored.
    pub fn api_url_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.api_url_override = Some(url);
        }
        self
    }

    /// Sets the global native-bridge marker.
    pub fn global_bridge(mut self, bridge: Arc<dyn NativeBridge>) -> Self {
        self.global_bridge = Some(bridge);
        self
    }

    /// Sets the locally bundled native-bridge module.
    pub fn bundled_bridge(mut self, bridge: Arc<dyn NativeBridge>) -> Self {
        self.bundled_bridge = Some(bridge);
        self
    }

    /// Sets the HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the native-only capability bundle.
    pub fn native_capabilities(mut self, native: NativeCapabilities) -> Self {
        self.native = Some(native);
        self
    }

    /// Sets the direct-download implementation.
    pub fn downloader(mut self, downloader: Arc<dyn DownloadTrigger>) -> Self {
        self.downloader = Some(downloader);
        self
    }

    /// Builds the final [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] when the override is not an absolute http(s) URL
    /// - [`Error::CapabilityMissing`] when the HTTP client or downloader is
    ///   absent and `desktop-shims` is disabled
    /// - [`Error::Bridge`] when a desktop default fails to initialize
    pub fn build(self) -> Result<ClientConfig> {
        let api_url_override = self
            .api_url_override
            .as_deref()
            .map(normalize_api_url)
            .transpose()?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let downloader = match self.downloader {
            Some(downloader) => downloader,
            None => provide_default_downloader()?,
        };

        let native = self.native.or_else(provide_default_native);

        Ok(ClientConfig {
            api_url_override,
            global_bridge: self.global_bridge,
            bundled_bridge: self.bundled_bridge,
            http_client,
            native,
            downloader,
        })
    }
}
