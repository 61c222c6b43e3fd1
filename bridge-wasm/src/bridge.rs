//! Probe for the `window.Capacitor` marker object.
//!
//! Native shells inject a global `Capacitor` object exposing
//! `isNativePlatform()` and `getPlatform()`. A plain browser has no such
//! object, and a hybrid build may have it before the native side attaches,
//! so every lookup returns a `Result` and never throws into the caller.

use bridge_traits::{
    bridge::{NativeBridge, PlatformName},
    error::{BridgeError, Result as BridgeResult},
};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::error::js_message;

/// Global-marker bridge backed by `window.Capacitor`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitorGlobalBridge;

impl CapacitorGlobalBridge {
    /// Create the probe. Lookups happen lazily on each query.
    pub fn new() -> Self {
        Self
    }

    fn marker() -> BridgeResult<JsValue> {
        let window = web_sys::window()
            .ok_or_else(|| BridgeError::NotAvailable("window".to_string()))?;
        let marker = Reflect::get(&window, &JsValue::from_str("Capacitor"))
            .map_err(|e| BridgeError::NotAvailable(js_message(&e)))?;

        if marker.is_undefined() || marker.is_null() {
            return Err(BridgeError::NotAvailable(
                "window.Capacitor is not defined".to_string(),
            ));
        }
        Ok(marker)
    }

    fn call(method: &str) -> BridgeResult<JsValue> {
        let marker = Self::marker()?;
        let function = Reflect::get(&marker, &JsValue::from_str(method))
            .map_err(|e| BridgeError::NotAvailable(js_message(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| BridgeError::NotAvailable(format!("Capacitor.{method} is not a function")))?;

        function
            .call0(&marker)
            .map_err(|e| BridgeError::OperationFailed(format!("Capacitor.{method}: {}", js_message(&e))))
    }
}

impl NativeBridge for CapacitorGlobalBridge {
    fn is_native_platform(&self) -> BridgeResult<bool> {
        Self::call("isNativePlatform")?.as_bool().ok_or_else(|| {
            BridgeError::OperationFailed("isNativePlatform returned a non-boolean".to_string())
        })
    }

    fn platform(&self) -> BridgeResult<PlatformName> {
        let name = Self::call("getPlatform")?.as_string().ok_or_else(|| {
            BridgeError::OperationFailed("getPlatform returned a non-string".to_string())
        })?;
        Ok(name.parse().unwrap_or(PlatformName::Unknown))
    }
}
