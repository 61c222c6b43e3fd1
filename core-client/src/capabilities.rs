//! Construction-time selection of the capability set.
//!
//! The platform verdict is computed once; the factory then wires either the
//! native capabilities from the configuration or the web fallbacks. Nothing
//! re-checks the platform afterwards.

use std::sync::Arc;

use bridge_traits::{fallback::AlwaysOnline, http::HttpClient, network::NetworkMonitor};
use core_runtime::config::ClientConfig;

use crate::error::{ClientError, Result};
use crate::export::ExportPipeline;
use crate::notify::NotificationSideChannel;
use crate::platform::PlatformVerdict;

/// Capabilities the client uses for its whole lifetime.
#[derive(Clone)]
pub struct PlatformCapabilities {
    pub http_client: Arc<dyn HttpClient>,
    pub network_monitor: Arc<dyn NetworkMonitor>,
    pub notifications: NotificationSideChannel,
    pub export: ExportPipeline,
}

impl PlatformCapabilities {
    /// Pick native or web capabilities for `verdict`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Setup`] when the verdict is native but the
    /// configuration carries no native capabilities.
    pub fn select(verdict: PlatformVerdict, config: &ClientConfig) -> Result<Self> {
        let http_client = Arc::clone(&config.http_client);

        if !verdict.is_mobile {
            return Ok(Self {
                http_client,
                network_monitor: Arc::new(AlwaysOnline),
                notifications: NotificationSideChannel::silent(),
                export: ExportPipeline::web(Arc::clone(&config.downloader)),
            });
        }

        let native = config.native.as_ref().ok_or_else(|| {
            ClientError::Setup(core_runtime::Error::CapabilityMissing {
                capability: "NativeCapabilities".to_string(),
                message: format!(
                    "The {} shell was detected but no native capabilities were injected. \
                     Provide a network monitor, notifier, document store and share sheet, \
                     or enable the 'desktop-shims' feature.",
                    verdict.platform
                ),
            })
        })?;

        Ok(Self {
            http_client,
            network_monitor: Arc::clone(&native.network_monitor),
            notifications: NotificationSideChannel::native(Arc::clone(&native.notifier)),
            export: ExportPipeline::mobile(
                Arc::clone(&native.document_store),
                Arc::clone(&native.share_sheet),
            ),
        })
    }
}
