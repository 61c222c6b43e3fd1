//! Runtime platform detection.
//!
//! The probe asks up to two native bridges, in order, whether the process
//! runs inside a native shell. The first bridge that answers decides; a
//! bridge whose query fails is skipped. With no answer the client runs in
//! web mode. Detection never fails.

use std::sync::Arc;

use bridge_traits::bridge::{NativeBridge, PlatformName};
use serde::Serialize;
use tracing::debug;

/// Immutable description of where the client runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub is_mobile: bool,
    pub platform: PlatformName,
    pub api_base_url: String,
}

/// Outcome of one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformVerdict {
    pub is_mobile: bool,
    pub platform: PlatformName,
}

impl PlatformVerdict {
    pub const WEB: PlatformVerdict = PlatformVerdict {
        is_mobile: false,
        platform: PlatformName::Web,
    };
}

/// Ordered native-bridge probe.
#[derive(Clone, Default)]
pub struct PlatformProbe {
    global: Option<Arc<dyn NativeBridge>>,
    bundled: Option<Arc<dyn NativeBridge>>,
}

impl PlatformProbe {
    /// `global` is the host-injected marker, `bundled` the module shipped with the app.
    pub fn new(
        global: Option<Arc<dyn NativeBridge>>,
        bundled: Option<Arc<dyn NativeBridge>>,
    ) -> Self {
        Self { global, bundled }
    }

    /// Probe with no bridge at all: always web.
    pub fn web() -> Self {
        Self::default()
    }

    /// Whether the process runs inside a native mobile shell.
    pub fn detect(&self) -> bool {
        self.verdict().is_mobile
    }

    pub fn platform_name(&self) -> PlatformName {
        self.verdict().platform
    }

    pub fn verdict(&self) -> PlatformVerdict {
        let signals = [("global", &self.global), ("bundled", &self.bundled)];

        for (source, bridge) in signals {
            let Some(bridge) = bridge else {
                continue;
            };

            match bridge.is_native_platform() {
                Ok(true) => {
                    let platform = bridge.platform().unwrap_or(PlatformName::Unknown);
                    debug!(source, %platform, "Native shell detected");
                    return PlatformVerdict {
                        is_mobile: true,
                        platform,
                    };
                }
                Ok(false) => {
                    debug!(source, "Bridge reports a web context");
                    return PlatformVerdict::WEB;
                }
                Err(err) => {
                    debug!(source, error = %err, "Bridge unavailable, trying next signal");
                }
            }
        }

        PlatformVerdict::WEB
    }
}
