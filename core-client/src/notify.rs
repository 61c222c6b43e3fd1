//! Fire-and-forget toast feedback.
//!
//! Toasts are cosmetic. They run on a detached task, their failures are
//! logged at `debug` and dropped, and nothing on the request path ever
//! waits for them.

use std::sync::Arc;

use bridge_traits::notification::{Notifier, ToastDuration};
use futures::{channel::mpsc, StreamExt};
use tracing::debug;

use crate::runtime;

/// Lifecycle messages shown around each operation.
pub mod messages {
    pub const NO_CONNECTION: &str = "No internet connection";
    pub const UPLOAD_DONE: &str = "File uploaded successfully!";
    pub const CELL_UPDATED: &str = "Cell updated";
    pub const AI_STARTED: &str = "Processing AI command...";
    pub const AI_DONE: &str = "AI command executed!";
    pub const EXPORT_STARTED: &str = "Preparing export...";
    pub const EXPORT_SHARED: &str = "File exported and shared!";

    pub fn upload_progress(percent: u8) -> String {
        format!("Upload: {}%", percent)
    }

    pub fn upload_failed(reason: &str) -> String {
        format!("Upload error: {}", reason)
    }

    pub fn update_failed(reason: &str) -> String {
        format!("Error: {}", reason)
    }

    pub fn ai_failed(reason: &str) -> String {
        format!("AI error: {}", reason)
    }

    pub fn export_failed(reason: &str) -> String {
        format!("Export error: {}", reason)
    }
}

/// Side channel for toasts; silent in web mode.
#[derive(Clone)]
pub struct NotificationSideChannel {
    notifier: Option<Arc<dyn Notifier>>,
}

impl NotificationSideChannel {
    /// Channel that forwards to `notifier` (native shells).
    pub fn native(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier: Some(notifier),
        }
    }

    /// Channel that drops every toast (browsers).
    pub fn silent() -> Self {
        Self { notifier: None }
    }

    pub fn is_active(&self) -> bool {
        self.notifier.is_some()
    }

    /// Show `text` without waiting for the host.
    pub fn notify(&self, text: impl Into<String>, duration: ToastDuration) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };

        let notifier = Arc::clone(notifier);
        let text = text.into();
        let spawned = runtime::spawn_detached(async move {
            if let Err(err) = notifier.show(&text, duration).await {
                debug!(error = %err, "Toast failed");
            }
        });

        if !spawned {
            debug!("No async runtime, toast dropped");
        }
    }

    /// Sender whose percentages are shown as `Upload: N%` toasts, in order.
    ///
    /// The relay task ends when the sender is dropped. `None` when the
    /// channel is silent or no executor is available.
    pub fn progress_relay(&self) -> Option<mpsc::UnboundedSender<u8>> {
        let notifier = Arc::clone(self.notifier.as_ref()?);
        let (tx, mut rx) = mpsc::unbounded::<u8>();

        let spawned = runtime::spawn_detached(async move {
            while let Some(percent) = rx.next().await {
                let text = messages::upload_progress(percent);
                if let Err(err) = notifier.show(&text, ToastDuration::Short).await {
                    debug!(error = %err, "Progress toast failed");
                }
            }
        });

        spawned.then_some(tx)
    }
}
