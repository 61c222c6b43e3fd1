//! The two async primitives the client needs, per target.
//!
//! - Native: `tokio::time::timeout` and `tokio::runtime::Handle::spawn`
//! - WASM: `gloo-timers` raced against the future, and `spawn_local`

use std::future::Future;
use std::time::Duration;

/// The deadline elapsed before the future resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed;

#[cfg(not(target_arch = "wasm32"))]
pub async fn timeout<F: Future>(duration: Duration, future: F) -> Result<F::Output, Elapsed> {
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| Elapsed)
}

#[cfg(target_arch = "wasm32")]
pub async fn timeout<F: Future>(duration: Duration, future: F) -> Result<F::Output, Elapsed> {
    use futures::future::{select, Either};

    let timer = gloo_timers::future::sleep(duration);
    futures::pin_mut!(future);
    futures::pin_mut!(timer);

    match select(future, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(Elapsed),
    }
}

/// Run `future` in the background, detached from the caller.
///
/// Returns `false` when no executor is available and the future was dropped.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<F>(future: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
            true
        }
        Err(_) => false,
    }
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_detached<F>(future: F) -> bool
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
    true
}
