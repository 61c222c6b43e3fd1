//! Toast Notification Abstraction

use serde::{Deserialize, Serialize};

use crate::{error::Result, platform::PlatformSendSync};

/// How long the host should keep a toast on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    Short,
    Long,
}

/// Toast-style user feedback provided by the host shell.
///
/// Purely cosmetic: the core never awaits the result on its main path and
/// discards any error.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Notifier: PlatformSendSync {
    /// Show `text` for roughly `duration`
    async fn show(&self, text: &str, duration: ToastDuration) -> Result<()>;
}
