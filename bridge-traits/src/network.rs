//! Network Monitoring Abstraction
//!
//! Provides network connectivity status, queried fresh for every call.

use serde::{Deserialize, Serialize};

use crate::{error::Result, platform::PlatformSendSync};

/// Network connection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    /// WiFi connection
    Wifi,
    /// Cellular/mobile data connection
    Cellular,
    /// No connection at all
    None,
    /// Connected through something the host cannot name
    Unknown,
}

/// Snapshot of the current network status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityStatus {
    pub connected: bool,
    pub connection_type: ConnectionType,
}

impl ConnectivityStatus {
    pub fn online(connection_type: ConnectionType) -> Self {
        Self {
            connected: true,
            connection_type,
        }
    }

    pub fn offline() -> Self {
        Self {
            connected: false,
            connection_type: ConnectionType::None,
        }
    }
}

/// Network monitor trait
///
/// Lets the core refuse to dispatch a request it already knows is doomed.
///
/// # Platform Support
///
/// - **iOS/Android**: the native shell's network status plugin
/// - **Desktop**: a cheap TCP reachability probe
/// - **Web**: not consulted; the browser surfaces failures from the request itself
///
/// # Example
///
/// ```ignore
/// use bridge_traits::network::NetworkMonitor;
///
/// async fn can_dispatch(monitor: &dyn NetworkMonitor) -> bool {
///     monitor.get_status().await.map(|s| s.connected).unwrap_or(false)
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait NetworkMonitor: PlatformSendSync {
    /// Get current network status
    async fn get_status(&self) -> Result<ConnectivityStatus>;

    /// Check if currently connected. Errors count as disconnected.
    async fn is_connected(&self) -> bool {
        matches!(
            self.get_status().await,
            Ok(ConnectivityStatus {
                connected: true,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    struct BrokenMonitor;

    #[async_trait::async_trait]
    impl NetworkMonitor for BrokenMonitor {
        async fn get_status(&self) -> Result<ConnectivityStatus> {
            Err(BridgeError::NotAvailable("network plugin".to_string()))
        }
    }

    #[test]
    fn test_connectivity_status_serde() {
        let status = ConnectivityStatus::online(ConnectionType::Wifi);
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"connected":true,"connectionType":"wifi"}"#);

        let parsed: ConnectivityStatus =
            serde_json::from_str(r#"{"connected":false,"connectionType":"none"}"#).unwrap();
        assert_eq!(parsed, ConnectivityStatus::offline());
    }

    #[tokio::test]
    async fn test_failing_monitor_reports_disconnected() {
        assert!(!BrokenMonitor.is_connected().await);
    }
}
