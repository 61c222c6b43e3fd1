//! Native-shell capabilities reached through `window.Capacitor.Plugins`.
//!
//! Inside a Capacitor shell the native side registers `Network`, `Toast`,
//! `Filesystem` and `Share` plugin objects. Every plugin method takes one
//! options object and returns a Promise. A missing plugin surfaces as
//! `NotAvailable`; a rejected Promise as `OperationFailed`.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    network::{ConnectionType, ConnectivityStatus, NetworkMonitor},
    notification::{Notifier, ToastDuration},
    share::{ShareRequest, ShareSheet},
    storage::{Directory, DocumentStore, WrittenFile},
};
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::error::js_message;

fn plugin(name: &str) -> BridgeResult<JsValue> {
    let window =
        web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".to_string()))?;
    let mut current: JsValue = window.into();

    for key in ["Capacitor", "Plugins", name] {
        current = Reflect::get(&current, &JsValue::from_str(key))
            .map_err(|e| BridgeError::NotAvailable(js_message(&e)))?;
        if current.is_undefined() || current.is_null() {
            return Err(BridgeError::NotAvailable(format!(
                "Capacitor plugin {name} is not registered"
            )));
        }
    }
    Ok(current)
}

/// Call `Capacitor.Plugins.<name>.<method>(options)` and await the Promise.
async fn invoke(name: &str, method: &str, options: &JsValue) -> BridgeResult<JsValue> {
    let target = plugin(name)?;
    let function = Reflect::get(&target, &JsValue::from_str(method))
        .map_err(|e| BridgeError::NotAvailable(js_message(&e)))?
        .dyn_into::<Function>()
        .map_err(|_| BridgeError::NotAvailable(format!("{name}.{method} is not a function")))?;

    let returned = function
        .call1(&target, options)
        .map_err(|e| BridgeError::OperationFailed(format!("{name}.{method}: {}", js_message(&e))))?;

    // Plugins always answer with a Promise; a plain value is taken as resolved.
    let promise = match returned.dyn_into::<Promise>() {
        Ok(promise) => promise,
        Err(value) => Promise::resolve(&value),
    };

    JsFuture::from(promise)
        .await
        .map_err(|e| BridgeError::OperationFailed(format!("{name}.{method}: {}", js_message(&e))))
}

fn options(fields: &[(&str, JsValue)]) -> BridgeResult<JsValue> {
    let object = Object::new();
    for (key, value) in fields {
        Reflect::set(&object, &JsValue::from_str(key), value)
            .map_err(|e| BridgeError::InvalidRequest(js_message(&e)))?;
    }
    Ok(object.into())
}

fn field(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// `Network.getStatus()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitorNetworkMonitor;

#[async_trait(?Send)]
impl NetworkMonitor for CapacitorNetworkMonitor {
    async fn get_status(&self) -> BridgeResult<ConnectivityStatus> {
        let status = invoke("Network", "getStatus", &JsValue::UNDEFINED).await?;

        let connected = field(&status, "connected").as_bool().ok_or_else(|| {
            BridgeError::OperationFailed("Network.getStatus returned no `connected` flag".into())
        })?;
        let connection_type = match field(&status, "connectionType").as_string().as_deref() {
            Some("wifi") => ConnectionType::Wifi,
            Some("cellular") => ConnectionType::Cellular,
            Some("none") => ConnectionType::None,
            _ => ConnectionType::Unknown,
        };

        Ok(ConnectivityStatus {
            connected,
            connection_type,
        })
    }
}

/// `Toast.show({ text, duration })`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitorToast;

#[async_trait(?Send)]
impl Notifier for CapacitorToast {
    async fn show(&self, text: &str, duration: ToastDuration) -> BridgeResult<()> {
        let duration = match duration {
            ToastDuration::Short => "short",
            ToastDuration::Long => "long",
        };
        let options = options(&[("text", text.into()), ("duration", duration.into())])?;
        invoke("Toast", "show", &options).await.map(|_| ())
    }
}

/// `Filesystem.writeFile({ path, data, directory })`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitorFilesystem;

#[async_trait(?Send)]
impl DocumentStore for CapacitorFilesystem {
    async fn write_base64(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> BridgeResult<WrittenFile> {
        let options = options(&[
            ("path", path.into()),
            ("data", data.into()),
            ("directory", directory.to_string().into()),
        ])?;
        let written = invoke("Filesystem", "writeFile", &options).await?;

        let uri = field(&written, "uri").as_string().ok_or_else(|| {
            BridgeError::OperationFailed("Filesystem.writeFile returned no uri".into())
        })?;
        Ok(WrittenFile { uri })
    }
}

/// `Share.share({ title, text, url, dialogTitle })`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitorShare;

#[async_trait(?Send)]
impl ShareSheet for CapacitorShare {
    async fn share(&self, request: ShareRequest) -> BridgeResult<()> {
        let options = options(&[
            ("title", request.title.into()),
            ("text", request.text.into()),
            ("url", request.url.into()),
            ("dialogTitle", request.dialog_title.into()),
        ])?;
        invoke("Share", "share", &options).await.map(|_| ())
    }
}
