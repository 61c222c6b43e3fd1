//! # Host Bridge Traits
//!
//! Capability traits that the sheet client core consumes but does not implement.
//!
//! ## Overview
//!
//! This crate defines the contract between the core network-access layer and
//! the host it runs in. Each trait represents one capability that behaves
//! differently inside a native mobile shell and inside a plain browser.
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Dispatch HTTP requests (JSON, multipart upload with progress)
//! - [`NetworkMonitor`](network::NetworkMonitor) - Current connectivity status
//!
//! ### Platform Integration
//! - [`NativeBridge`](bridge::NativeBridge) - "Are we inside a native shell?" query
//! - [`Notifier`](notification::Notifier) - Toast-style user feedback
//! - [`DocumentStore`](storage::DocumentStore) - Write exported files to the documents directory
//! - [`ShareSheet`](share::ShareSheet) - Hand a persisted file to the OS share dialog
//! - [`DownloadTrigger`](download::DownloadTrigger) - Browser-style direct download
//!
//! ### Utilities
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Native-only capabilities |
//! |----------|---------------------|--------------------------|
//! | Desktop  | `bridge-desktop`    | provided |
//! | Web      | `bridge-wasm`       | web fallbacks from [`fallback`] |
//! | iOS      | host-injected       | host-injected |
//! | Android  | host-injected       | host-injected |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should classify transport failures precisely (`Timeout`, `NoResponse`,
//! `InvalidRequest`) because the core maps them one-to-one onto its own error
//! taxonomy.
//!
//! ## Thread Safety
//!
//! Traits require `Send + Sync` on native targets through
//! [`PlatformSendSync`](platform::PlatformSendSync); on `wasm32` the bound is
//! dropped because browser handles are single-threaded.

pub mod bridge;
pub mod download;
pub mod error;
pub mod fallback;
pub mod http;
pub mod network;
pub mod notification;
pub mod platform;
pub mod share;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use bridge::{FixedBridge, NativeBridge, PlatformName};
pub use download::DownloadTrigger;
pub use http::{
    HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartFile, ProgressCallback,
};
pub use network::{ConnectionType, ConnectivityStatus, NetworkMonitor};
pub use notification::{Notifier, ToastDuration};
pub use share::{ShareRequest, ShareSheet};
pub use storage::{Directory, DocumentStore, WrittenFile};
pub use time::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
