//! Connectivity pre-flight for native shells.

use std::sync::Arc;

use bridge_traits::network::NetworkMonitor;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// Refuses to dispatch when the device reports no network.
///
/// Web mode never queries anything: the browser surfaces network failures
/// from the request itself.
#[derive(Clone)]
pub struct ConnectivityGate {
    is_mobile: bool,
    monitor: Arc<dyn NetworkMonitor>,
}

impl ConnectivityGate {
    pub fn new(is_mobile: bool, monitor: Arc<dyn NetworkMonitor>) -> Self {
        Self { is_mobile, monitor }
    }

    /// Current connectivity. A monitor that fails counts as offline.
    pub async fn check_connectivity(&self) -> bool {
        if !self.is_mobile {
            return true;
        }

        match self.monitor.get_status().await {
            Ok(status) => {
                debug!(
                    connected = status.connected,
                    connection_type = ?status.connection_type,
                    "Network status"
                );
                status.connected
            }
            Err(err) => {
                warn!(error = %err, "Network status unavailable, treating as offline");
                false
            }
        }
    }

    /// `Err(NoConnectivity)` when [`check_connectivity`](Self::check_connectivity) is false.
    pub async fn ensure_connected(&self) -> Result<()> {
        if self.check_connectivity().await {
            Ok(())
        } else {
            Err(ClientError::NoConnectivity)
        }
    }
}
