//! Share "dialog" for desktops

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    share::{ShareRequest, ShareSheet},
};
use tracing::info;

/// Desktops have no share sheet. The file already sits in the documents
/// directory, so sharing reports its location and succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingShareSheet;

#[async_trait]
impl ShareSheet for LoggingShareSheet {
    async fn share(&self, request: ShareRequest) -> Result<()> {
        if request.url.is_empty() {
            return Err(BridgeError::OperationFailed(
                "nothing to share: empty file URL".to_string(),
            ));
        }

        info!(title = %request.title, url = %request.url, "{}", request.dialog_title);
        Ok(())
    }
}
