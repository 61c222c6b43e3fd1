//! Export delivery: browser download, or persist-then-share on a device.
//!
//! ```text
//! Requested ─┬─ web ────► Downloaded ─────────────────────────┬─► Completed
//!            └─ mobile ─► Encoded ─► Persisted ─► Shared ─────┘
//! ```

use std::fmt;
use std::sync::Arc;

use bridge_traits::{
    download::DownloadTrigger,
    share::{ShareRequest, ShareSheet},
    storage::{Directory, DocumentStore},
};
use bytes::Bytes;
use core_runtime::logging::strip_path;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::encoding::encode_base64;
use crate::error::{ClientError, Result};

pub const SHARE_TITLE: &str = "Exported Excel file";
pub const SHARE_TEXT: &str = "Your edited Excel file";
pub const SHARE_DIALOG_TITLE: &str = "Share the Excel file";

/// Binary export produced by the backend, consumed once by the pipeline.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename_hint: String,
    pub bytes: Bytes,
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    pub success: bool,
    /// Object URL or path (web), shared file URI (mobile)
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Requested,
    Downloaded,
    Encoded,
    Persisted,
    Shared,
    Completed,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportStage::Requested => "requested",
            ExportStage::Downloaded => "downloaded",
            ExportStage::Encoded => "encoded",
            ExportStage::Persisted => "persisted",
            ExportStage::Shared => "shared",
            ExportStage::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
enum Delivery {
    Download(Arc<dyn DownloadTrigger>),
    StoreAndShare {
        store: Arc<dyn DocumentStore>,
        share: Arc<dyn ShareSheet>,
    },
}

/// Platform-dependent export delivery.
#[derive(Clone)]
pub struct ExportPipeline {
    delivery: Delivery,
}

impl ExportPipeline {
    /// Browser delivery through a direct download.
    pub fn web(downloader: Arc<dyn DownloadTrigger>) -> Self {
        Self {
            delivery: Delivery::Download(downloader),
        }
    }

    /// Device delivery: write to the documents directory, then share.
    pub fn mobile(store: Arc<dyn DocumentStore>, share: Arc<dyn ShareSheet>) -> Self {
        Self {
            delivery: Delivery::StoreAndShare { store, share },
        }
    }

    pub async fn export(&self, artifact: ExportArtifact) -> Result<ExportOutcome> {
        let file = strip_path(&artifact.filename_hint).to_string();
        trace_stage(ExportStage::Requested, &file);

        let location = match &self.delivery {
            Delivery::Download(downloader) => {
                let location = downloader
                    .trigger_download(&artifact.filename_hint, artifact.bytes)
                    .await
                    .map_err(|err| {
                        warn!(file = %file, error = %err, "Download failed");
                        ClientError::Persist(err.to_string())
                    })?;
                trace_stage(ExportStage::Downloaded, &file);
                location
            }
            Delivery::StoreAndShare { store, share } => {
                let ExportArtifact {
                    filename_hint,
                    bytes,
                } = artifact;

                let encoded = encode_artifact(&bytes)?;
                trace_stage(ExportStage::Encoded, &file);

                let written = store
                    .write_base64(&filename_hint, &encoded, Directory::Documents)
                    .await
                    .map_err(|err| {
                        warn!(file = %file, error = %err, "Persisting export failed");
                        ClientError::Persist(err.to_string())
                    })?;
                trace_stage(ExportStage::Persisted, &file);

                share
                    .share(ShareRequest {
                        title: SHARE_TITLE.to_string(),
                        text: SHARE_TEXT.to_string(),
                        url: written.uri.clone(),
                        dialog_title: SHARE_DIALOG_TITLE.to_string(),
                    })
                    .await
                    .map_err(|err| {
                        warn!(file = %file, error = %err, "Sharing export failed");
                        ClientError::Share(err.to_string())
                    })?;
                trace_stage(ExportStage::Shared, &file);

                written.uri
            }
        };

        trace_stage(ExportStage::Completed, &file);
        info!(file = %file, "Export completed");

        Ok(ExportOutcome {
            success: true,
            location,
        })
    }
}

/// An empty body is not a spreadsheet; refuse it before touching storage.
fn encode_artifact(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(ClientError::Encode("export is empty".to_string()));
    }
    Ok(encode_base64(bytes))
}

fn trace_stage(stage: ExportStage, file: &str) {
    debug!(%stage, file, "Export stage");
}
