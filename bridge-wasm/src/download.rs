//! Browser download through a transient Blob URL and a hidden anchor.

use async_trait::async_trait;
use bridge_traits::{download::DownloadTrigger, error::Result as BridgeResult};
use bytes::Bytes;
use js_sys::{Array, Uint8Array};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Blob, HtmlAnchorElement, Url};

use crate::error::{WasmError, WasmResult};

/// Triggers a file download in the current page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserDownloader;

impl BrowserDownloader {
    /// Create a downloader for the current window
    pub fn new() -> Self {
        Self
    }

    fn download(filename: &str, bytes: &[u8]) -> WasmResult<String> {
        let window = web_sys::window().ok_or_else(|| WasmError::Unavailable("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| WasmError::Unavailable("document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| WasmError::Unavailable("document.body".into()))?;

        let parts = Array::new();
        parts.push(&Uint8Array::from(bytes));
        let blob = Blob::new_with_u8_array_sequence(&parts)
            .map_err(|e| WasmError::from_js("create blob", e))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| WasmError::from_js("create object URL", e))?;

        let result = (|| -> WasmResult<()> {
            let anchor = document
                .create_element("a")
                .map_err(|e| WasmError::from_js("create anchor", e))?
                .dyn_into::<HtmlAnchorElement>()
                .map_err(|_| WasmError::JavaScript("<a> is not an anchor element".into()))?;
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor
                .set_attribute("style", "display: none")
                .map_err(|e| WasmError::from_js("hide anchor", e))?;

            body.append_child(&anchor)
                .map_err(|e| WasmError::from_js("attach anchor", e))?;
            anchor.click();
            anchor.remove();
            Ok(())
        })();

        // The object URL is released whether or not the click went through
        let _ = Url::revoke_object_url(&url);
        result.map(|()| url)
    }
}

#[async_trait(?Send)]
impl DownloadTrigger for BrowserDownloader {
    async fn trigger_download(&self, filename: &str, bytes: Bytes) -> BridgeResult<String> {
        let location = Self::download(filename, &bytes)?;
        debug!(filename, size = bytes.len(), "Triggered browser download");
        Ok(location)
    }
}
