//! Web fallbacks for the native-only capabilities.
//!
//! A browser build has no network plugin, no toast, no documents directory and
//! no share sheet. These stand-ins keep the capability set complete so the
//! core can be assembled the same way on every platform.

use crate::{
    error::{BridgeError, Result},
    network::{ConnectionType, ConnectivityStatus, NetworkMonitor},
    notification::{Notifier, ToastDuration},
    share::{ShareRequest, ShareSheet},
    storage::{Directory, DocumentStore, WrittenFile},
};

/// Always reports a WiFi connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl NetworkMonitor for AlwaysOnline {
    async fn get_status(&self) -> Result<ConnectivityStatus> {
        Ok(ConnectivityStatus::online(ConnectionType::Wifi))
    }
}

/// Accepts every toast and shows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl Notifier for SilentNotifier {
    async fn show(&self, _text: &str, _duration: ToastDuration) -> Result<()> {
        Ok(())
    }
}

/// Rejects every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableDocumentStore;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl DocumentStore for UnavailableDocumentStore {
    async fn write_base64(
        &self,
        _path: &str,
        _data: &str,
        _directory: Directory,
    ) -> Result<WrittenFile> {
        Err(BridgeError::NotAvailable(
            "filesystem is not available in web mode".to_string(),
        ))
    }
}

/// Rejects every share.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableShareSheet;

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl ShareSheet for UnavailableShareSheet {
    async fn share(&self, _request: ShareRequest) -> Result<()> {
        Err(BridgeError::NotAvailable(
            "share is not available in web mode".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_web_fallbacks() {
        assert!(AlwaysOnline.is_connected().await);
        assert!(SilentNotifier.show("hello", ToastDuration::Short).await.is_ok());

        let write = UnavailableDocumentStore
            .write_base64("export.xlsx", "AAAA", Directory::Documents)
            .await;
        assert!(matches!(write, Err(BridgeError::NotAvailable(_))));

        let share = UnavailableShareSheet
            .share(ShareRequest {
                title: "t".to_string(),
                text: "x".to_string(),
                url: "file:///tmp/export.xlsx".to_string(),
                dialog_title: "d".to_string(),
            })
            .await;
        assert!(matches!(share, Err(BridgeError::NotAvailable(_))));
    }
}
