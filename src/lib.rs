//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`core-client`, `bridge-desktop`, `bridge-wasm`). Host
//! applications can depend on `sheet-client-workspace` and enable
//! `desktop-shims` or `wasm` without wiring each crate individually.

#[cfg(any(feature = "desktop-shims", feature = "wasm"))]
pub use core_client as client;
