//! Direct Download Abstraction

use bytes::Bytes;

use crate::{error::Result, platform::PlatformSendSync};

/// Saves a binary artifact the way a browser download would.
///
/// - **Web**: Blob + object URL + hidden `<a download>` click
/// - **Desktop**: file written to the downloads directory
///
/// Returns a human-readable location (object URL or filesystem path).
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait DownloadTrigger: PlatformSendSync {
    async fn trigger_download(&self, filename: &str, bytes: Bytes) -> Result<String>;
}
