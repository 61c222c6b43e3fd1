//! Toast notifications routed to `tracing`

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    notification::{Notifier, ToastDuration},
};
use tracing::info;

/// Desktop hosts have no toast surface; toasts become `info` events on the
/// `toast` target so a log view or `LoggerSink` can display them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn show(&self, text: &str, duration: ToastDuration) -> Result<()> {
        info!(target: "toast", ?duration, "{}", text);
        Ok(())
    }
}
