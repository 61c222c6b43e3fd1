//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop hosts
//! (macOS, Windows, Linux) and for native shells that have not injected
//! their own adapters yet.
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` (timeouts, multipart uploads with progress)
//! - `NetworkMonitor` using a TCP reachability probe
//! - `Notifier` forwarding toasts to `tracing`
//! - `DocumentStore` using `tokio::fs` under the user's documents directory
//! - `DownloadTrigger` saving files to the downloads directory
//! - `ShareSheet` that records the shared location (desktops have no share dialog)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, TokioDocumentStore};
//!
//! #[tokio::main]
//! async fn main() -> bridge_traits::error::Result<()> {
//!     let http_client = ReqwestHttpClient::new()?;
//!     let documents = TokioDocumentStore::new();
//!     // Hand both to the client configuration
//!     Ok(())
//! }
//! ```

mod download;
mod filesystem;
mod http;
mod network;
mod notification;
mod share;

pub use download::DirectoryDownloader;
pub use filesystem::TokioDocumentStore;
pub use http::ReqwestHttpClient;
pub use network::DesktopNetworkMonitor;
pub use notification::TracingNotifier;
pub use share::LoggingShareSheet;

/// Folder name used under every platform directory
pub(crate) const APP_DIR_NAME: &str = "sheet-client";
