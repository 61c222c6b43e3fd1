//! Error types for WebAssembly bridge implementations

use thiserror::Error;
use wasm_bindgen::JsCast;

/// Result type for WebAssembly bridge operations
pub type WasmResult<T> = Result<T, WasmError>;

/// Errors that can occur in WebAssembly bridge implementations
#[derive(Error, Debug)]
pub enum WasmError {
    /// A browser global (`window`, `document`, `body`) is missing
    #[error("Browser API unavailable: {0}")]
    Unavailable(String),

    /// JavaScript error from web-sys
    #[error("JavaScript error: {0}")]
    JavaScript(String),
}

impl WasmError {
    /// Describe a `JsValue` thrown by a browser API
    pub fn from_js(context: &str, value: wasm_bindgen::JsValue) -> Self {
        WasmError::JavaScript(format!("{context}: {}", js_message(&value)))
    }
}

impl From<WasmError> for bridge_traits::error::BridgeError {
    fn from(err: WasmError) -> Self {
        match err {
            WasmError::Unavailable(what) => bridge_traits::error::BridgeError::NotAvailable(what),
            WasmError::JavaScript(msg) => bridge_traits::error::BridgeError::OperationFailed(msg),
        }
    }
}

/// Best-effort text for a thrown JavaScript value
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    if let Some(text) = value.as_string() {
        text
    } else if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        error.message().into()
    } else {
        format!("{:?}", value)
    }
}
