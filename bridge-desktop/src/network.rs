//! Network Monitoring Implementation

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    network::{ConnectionType, ConnectivityStatus, NetworkMonitor},
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Public DNS resolver used as the default reachability target
const DEFAULT_PROBE_ADDR: ([u8; 4], u16) = ([8, 8, 8, 8], 53);

/// Desktop network monitor implementation
///
/// Answers "is there a network path?" with a TCP connect to a well-known
/// address. Desktops cannot cheaply tell WiFi from Ethernet, so a reachable
/// probe reports `ConnectionType::Unknown`.
pub struct DesktopNetworkMonitor {
    probe_addr: SocketAddr,
    probe_timeout: Duration,
}

impl DesktopNetworkMonitor {
    pub fn new() -> Self {
        Self::with_probe(SocketAddr::from(DEFAULT_PROBE_ADDR), Duration::from_secs(5))
    }

    /// Probe a custom address, e.g. the backend host itself
    pub fn with_probe(probe_addr: SocketAddr, probe_timeout: Duration) -> Self {
        Self {
            probe_addr,
            probe_timeout,
        }
    }

    async fn probe(&self) -> bool {
        matches!(
            tokio::time::timeout(self.probe_timeout, TcpStream::connect(self.probe_addr)).await,
            Ok(Ok(_))
        )
    }
}

impl Default for DesktopNetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkMonitor for DesktopNetworkMonitor {
    async fn get_status(&self) -> Result<ConnectivityStatus> {
        let status = if self.probe().await {
            ConnectivityStatus::online(ConnectionType::Unknown)
        } else {
            ConnectivityStatus::offline()
        };

        debug!(probe = %self.probe_addr, connected = status.connected, "Network status probed");
        Ok(status)
    }
}
