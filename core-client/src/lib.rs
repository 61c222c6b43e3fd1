//! # Core Client
//!
//! Adaptive network-access layer for the spreadsheet client.
//!
//! The same [`SheetClient`] runs in a desktop browser and inside a native
//! mobile shell. At construction it asks the host bridges which one it is,
//! picks the backend address, and wires the matching capabilities:
//!
//! | Concern        | Web                  | Native shell                       |
//! |----------------|----------------------|------------------------------------|
//! | Base URL       | override or default  | first emulator/device candidate    |
//! | Connectivity   | assumed online       | network monitor, fail-closed       |
//! | Toasts         | none                 | detached, best effort              |
//! | Export         | direct download      | documents directory, then share    |
//!
//! Everything else (timeouts, the response envelope, error mapping) is
//! shared by both modes.

pub mod capabilities;
pub mod client;
pub mod connectivity;
pub mod encoding;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod export;
pub mod notify;
pub mod platform;
pub mod runtime;
pub mod transport;

pub use client::{SheetClient, DEFAULT_EXPORT_FILENAME};
pub use connectivity::ConnectivityGate;
pub use endpoint::{EndpointResolver, DEFAULT_WEB_API_URL, MOBILE_API_CANDIDATES};
pub use envelope::{
    ApiResponse, CellUpdate, ColumnDef, ServerStatus, TablePayload, UploadFile,
    DEFAULT_SERVER_ERROR,
};
pub use error::{ClientError, ErrorKind, Result};
pub use export::{ExportArtifact, ExportOutcome, ExportPipeline};
pub use notify::NotificationSideChannel;
pub use platform::{PlatformInfo, PlatformProbe, PlatformVerdict};
pub use transport::{TransportClient, UploadProgress, REQUEST_TIMEOUT};

pub use core_runtime::config::{ClientConfig, ClientConfigBuilder, NativeCapabilities};
