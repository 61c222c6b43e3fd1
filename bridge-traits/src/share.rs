//! Share Sheet Abstraction

use serde::{Deserialize, Serialize};

use crate::{error::Result, platform::PlatformSendSync};

/// Content handed to the OS share dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    /// URI of the file to share, as returned by a `DocumentStore`
    pub url: String,
    pub dialog_title: String,
}

/// Opens the platform share dialog for a persisted file.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait ShareSheet: PlatformSendSync {
    async fn share(&self, request: ShareRequest) -> Result<()>;
}
