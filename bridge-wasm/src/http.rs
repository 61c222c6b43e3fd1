//! WebAssembly implementation of the `HttpClient` bridge trait.
//!
//! Requests go through the browser's `fetch` API. Timeouts abort the request
//! through an `AbortController`. `fetch` has no upload progress events, so a
//! progress callback receives a single `(total, total)` report once the
//! response arrives.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    http::{HttpBody, HttpClient, HttpRequest, HttpResponse},
};
use bytes::Bytes;
use futures::{
    future::{select, Either},
    pin_mut, FutureExt,
};
use gloo_timers::future::TimeoutFuture;
use js_sys::{try_iter, Array, Uint8Array};
use std::{collections::HashMap, time::Duration};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Blob, FormData, Request, RequestInit, RequestMode, Response, Window};

use crate::error::js_message;

/// WebAssembly HTTP client backed by the browser's `fetch` API.
pub struct WasmHttpClient {
    window: Window,
}

impl WasmHttpClient {
    /// Create a new client bound to the current browser window.
    pub fn new() -> BridgeResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| BridgeError::NotAvailable("window".to_string()))?;
        Ok(Self { window })
    }

    fn body_value(body: &HttpBody) -> BridgeResult<JsValue> {
        match body {
            HttpBody::Bytes(bytes) => Ok(JsValue::from(Uint8Array::from(bytes.as_ref()))),
            HttpBody::Multipart(file) => {
                let parts = Array::new();
                parts.push(&Uint8Array::from(file.data.as_ref()));
                let blob = Blob::new_with_u8_array_sequence(&parts)
                    .map_err(|err| invalid("create blob", err))?;

                let form = FormData::new().map_err(|err| invalid("create form", err))?;
                form.append_with_blob_and_filename(&file.field_name, &blob, &file.file_name)
                    .map_err(|err| invalid("append file", err))?;
                Ok(JsValue::from(form))
            }
        }
    }

    fn build_request(
        &self,
        request: &HttpRequest,
        signal: Option<&web_sys::AbortSignal>,
    ) -> BridgeResult<Request> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);

        if let Some(signal) = signal {
            init.set_signal(Some(signal));
        }

        if let Some(body) = &request.body {
            init.set_body(&Self::body_value(body)?);
        }

        let headers = web_sys::Headers::new().map_err(|err| invalid("create headers", err))?;
        for (key, value) in &request.headers {
            headers
                .set(key, value)
                .map_err(|err| invalid("set header", err))?;
        }
        init.set_headers(&headers);

        Request::new_with_str_and_init(&request.url, &init)
            .map_err(|err| invalid("build request", err))
    }

    async fn fetch_with_timeout(
        &self,
        req: &Request,
        controller: Option<AbortController>,
        timeout: Option<Duration>,
    ) -> BridgeResult<Response> {
        let fetch = JsFuture::from(self.window.fetch_with_request(req));

        let result = if let (Some(timeout), Some(controller)) = (timeout, controller) {
            let timeout_ms = timeout.as_millis().min(u32::MAX as u128) as u32;
            let timeout_fut = TimeoutFuture::new(timeout_ms).map(|_| ());
            pin_mut!(timeout_fut);
            pin_mut!(fetch);

            match select(fetch, timeout_fut).await {
                Either::Left((response, _)) => response,
                Either::Right((_, pending_fetch)) => {
                    controller.abort();
                    let _ = pending_fetch.await;
                    return Err(BridgeError::Timeout(format!(
                        "no response after {} ms",
                        timeout.as_millis()
                    )));
                }
            }
        } else {
            fetch.await
        };

        // fetch rejects only when nothing came back (network error, CORS)
        let js_value = result.map_err(|err| BridgeError::NoResponse(js_message(&err)))?;
        js_value
            .dyn_into::<Response>()
            .map_err(|_| BridgeError::NoResponse("fetch returned non-Response".into()))
    }

    async fn read_body(response: &Response) -> BridgeResult<Bytes> {
        let promise = response
            .array_buffer()
            .map_err(|err| BridgeError::NoResponse(js_message(&err)))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|err| BridgeError::NoResponse(js_message(&err)))?;
        let array = Uint8Array::new(&buffer);
        let mut bytes = vec![0u8; array.length() as usize];
        array.copy_to(&mut bytes);
        Ok(Bytes::from(bytes))
    }

    fn collect_headers(response: &Response) -> HashMap<String, String> {
        let mut map = HashMap::new();
        let Ok(Some(iterator)) = try_iter(&JsValue::from(response.headers())) else {
            return map;
        };

        for entry in iterator.flatten() {
            let pair = Array::from(&entry);
            if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                map.insert(key, value);
            }
        }
        map
    }
}

#[async_trait(?Send)]
impl HttpClient for WasmHttpClient {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        let controller = if request.timeout.is_some() {
            Some(AbortController::new().map_err(|err| invalid("create abort controller", err))?)
        } else {
            None
        };

        let signal = controller.as_ref().map(|c| c.signal());
        let req = self.build_request(&request, signal.as_ref())?;
        let response = self
            .fetch_with_timeout(&req, controller, request.timeout)
            .await?;

        if let (Some(progress), Some(HttpBody::Multipart(file))) = (&request.progress, &request.body) {
            let total = file.data.len() as u64;
            progress.report(total, total);
        }

        let body = Self::read_body(&response).await?;
        Ok(HttpResponse {
            status: response.status(),
            headers: Self::collect_headers(&response),
            body,
        })
    }
}

fn invalid(context: &str, err: JsValue) -> BridgeError {
    BridgeError::InvalidRequest(format!("WasmHttpClient {context}: {}", js_message(&err)))
}
