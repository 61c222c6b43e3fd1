//! Direct download implementation for desktops

use async_trait::async_trait;
use bridge_traits::{
    download::DownloadTrigger,
    error::{BridgeError, Result},
};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Saves "downloaded" artifacts into the user's downloads directory, the way a
/// browser would.
pub struct DirectoryDownloader {
    target_dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new() -> Self {
        let target_dir = dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
            .unwrap_or_else(std::env::temp_dir);
        Self { target_dir }
    }

    pub fn with_directory(target_dir: PathBuf) -> Self {
        Self { target_dir }
    }
}

impl Default for DirectoryDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DownloadTrigger for DirectoryDownloader {
    async fn trigger_download(&self, filename: &str, bytes: Bytes) -> Result<String> {
        // Only the final component is honoured, like the `download` attribute
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| {
                BridgeError::OperationFailed(format!("Invalid download name: {:?}", filename))
            })?;

        fs::create_dir_all(&self.target_dir).await?;
        let target = self.target_dir.join(name);
        fs::write(&target, &bytes).await?;

        debug!(path = ?target, size = bytes.len(), "Saved download");
        Ok(target.display().to_string())
    }
}
