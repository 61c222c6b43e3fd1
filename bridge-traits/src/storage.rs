//! Document Storage Abstraction
//!
//! Persists exported files inside a platform-managed directory.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{error::Result, platform::PlatformSendSync};

/// Platform-managed directories a file can be written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directory {
    /// User-visible documents folder
    Documents,
    /// Private application data
    Data,
    /// Cache the OS may purge
    Cache,
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directory::Documents => f.write_str("DOCUMENTS"),
            Directory::Data => f.write_str("DATA"),
            Directory::Cache => f.write_str("CACHE"),
        }
    }
}

/// Handle to a file the store has written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// URI the share capability can consume (`file://…` or a content URI)
    pub uri: String,
}

/// File persistence capability.
///
/// Mirrors the native shell's filesystem plugin: data arrives base64-encoded
/// and the store writes the decoded bytes.
///
/// - **iOS/Android**: the shell's filesystem plugin
/// - **Desktop**: `tokio::fs` under the user's documents directory
/// - **Web**: unavailable
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::{Directory, DocumentStore};
///
/// async fn save(store: &dyn DocumentStore, encoded: &str) -> Result<String> {
///     let file = store.write_base64("report.xlsx", encoded, Directory::Documents).await?;
///     Ok(file.uri)
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait DocumentStore: PlatformSendSync {
    /// Write base64 `data` to `path` inside `directory`, replacing any existing file
    async fn write_base64(&self, path: &str, data: &str, directory: Directory)
        -> Result<WrittenFile>;
}
