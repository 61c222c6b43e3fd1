//! WebAssembly Bridge Implementations
//!
//! Browser implementations of the bridge traits defined in `bridge-traits`,
//! built on `web-sys` and `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It compiles to an empty crate on native targets.
//!
//! # Implementations
//!
//! - `WasmHttpClient`: `fetch`-based HTTP client with `AbortController` timeouts
//! - `BrowserDownloader`: Blob + hidden anchor download
//! - `CapacitorGlobalBridge`: probes the `window.Capacitor` marker object
//! - `CapacitorNetworkMonitor`, `CapacitorToast`, `CapacitorFilesystem`,
//!   `CapacitorShare`: the shell's `Network`, `Toast`, `Filesystem` and
//!   `Share` plugins
//!
//! In a plain browser the native-only capabilities come from the web
//! fallbacks in `bridge_traits::fallback`.
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::build_web_bridges;
//!
//! let bridges = build_web_bridges()?;
//! let is_native = bridges.global_bridge.is_native_platform().unwrap_or(false);
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod bootstrap;
pub mod bridge;
pub mod download;
pub mod error;
pub mod http;
pub mod plugins;

// Re-export commonly used types
pub use bootstrap::{build_web_bridges, WebBridgeSet};
pub use bridge::CapacitorGlobalBridge;
pub use download::BrowserDownloader;
pub use error::{WasmError, WasmResult};
pub use http::WasmHttpClient;
pub use plugins::{CapacitorFilesystem, CapacitorNetworkMonitor, CapacitorShare, CapacitorToast};
