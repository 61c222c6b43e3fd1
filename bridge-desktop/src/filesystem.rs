//! Document Store Implementation using Tokio

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bridge_traits::{
    error::{BridgeError, Result},
    storage::{Directory, DocumentStore, WrittenFile},
};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::APP_DIR_NAME;

/// Tokio-based document store
///
/// Maps each [`Directory`] onto a per-user platform directory (via `dirs`)
/// with an application sub-folder, created on first write.
pub struct TokioDocumentStore {
    documents_dir: PathBuf,
    data_dir: PathBuf,
    cache_dir: PathBuf,
}

impl TokioDocumentStore {
    /// Create a store rooted in the user's default directories
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        let documents_dir = dirs::document_dir()
            .unwrap_or_else(|| home.join("Documents"))
            .join(APP_DIR_NAME);

        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| home.join(".local").join("share"))
            .join(APP_DIR_NAME);

        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME);

        Self::with_directories(documents_dir, data_dir, cache_dir)
    }

    /// Create a store with explicit directories
    pub fn with_directories(documents_dir: PathBuf, data_dir: PathBuf, cache_dir: PathBuf) -> Self {
        Self {
            documents_dir,
            data_dir,
            cache_dir,
        }
    }

    fn root(&self, directory: Directory) -> &Path {
        match directory {
            Directory::Documents => &self.documents_dir,
            Directory::Data => &self.data_dir,
            Directory::Cache => &self.cache_dir,
        }
    }

    /// Resolve `path` inside `directory`, refusing anything that escapes it
    fn resolve(&self, path: &str, directory: Directory) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if path.is_empty() || escapes {
            return Err(BridgeError::OperationFailed(format!(
                "Invalid file path for {}: {:?}",
                directory, path
            )));
        }

        Ok(self.root(directory).join(relative))
    }
}

impl Default for TokioDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for TokioDocumentStore {
    async fn write_base64(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<WrittenFile> {
        let target = self.resolve(path, directory)?;
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid base64 data: {}", e)))?;

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, &bytes).await?;

        debug!(path = ?target, size = bytes.len(), "Wrote document");
        Ok(WrittenFile {
            uri: format!("file://{}", target.display()),
        })
    }
}
