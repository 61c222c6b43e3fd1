//! Native Bridge Probe
//!
//! The native shell (when there is one) exposes a bridge object that can say
//! whether the code runs inside it. The bridge may be missing entirely (pure
//! web build) or present but not attached yet, so every query is fallible.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    error::{BridgeError, Result},
    platform::PlatformSendSync,
};

/// Platform the process runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformName {
    Web,
    Android,
    Ios,
    Unknown,
}

impl PlatformName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformName::Web => "web",
            PlatformName::Android => "android",
            PlatformName::Ios => "ios",
            PlatformName::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "web" => PlatformName::Web,
            "android" => PlatformName::Android,
            "ios" => PlatformName::Ios,
            _ => PlatformName::Unknown,
        })
    }
}

/// Query surface of a native-shell bridge.
pub trait NativeBridge: PlatformSendSync {
    /// Whether the process runs inside a native shell
    fn is_native_platform(&self) -> Result<bool>;

    /// Name of the platform as reported by the bridge
    fn platform(&self) -> Result<PlatformName>;
}

/// Bridge with a fixed answer.
///
/// Native hosts that already know where they run inject one of these instead
/// of a live bridge object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBridge {
    platform: Option<PlatformName>,
}

impl FixedBridge {
    pub fn new(platform: PlatformName) -> Self {
        Self {
            platform: Some(platform),
        }
    }

    /// A bridge that is present but not attached: every query fails.
    pub fn detached() -> Self {
        Self { platform: None }
    }
}

impl NativeBridge for FixedBridge {
    fn is_native_platform(&self) -> Result<bool> {
        self.platform()
            .map(|p| matches!(p, PlatformName::Android | PlatformName::Ios))
    }

    fn platform(&self) -> Result<PlatformName> {
        self.platform
            .ok_or_else(|| BridgeError::NotAvailable("native bridge not attached".to_string()))
    }
}
