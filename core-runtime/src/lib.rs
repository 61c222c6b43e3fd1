//! # Core Runtime Module
//!
//! Ambient infrastructure for the sheet client:
//! - Logging and tracing setup, with host log mirroring
//! - Client configuration and capability validation
//!
//! ## Overview
//!
//! Everything here is independent of the HTTP contract with the backend.
//! `core-client` consumes a [`config::ClientConfig`] built with this crate
//! and logs through the subscriber installed by [`logging::init_logging`].

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ClientConfig, ClientConfigBuilder, NativeCapabilities};
pub use error::{Error, Result};
