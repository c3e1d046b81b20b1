//! Notifier that writes notices to the log.

use crate::providers::Notifier;
use tracing::{info, warn};

/// Tracing notifier.
///
/// Logs notices instead of rendering toasts. Useful for development, headless
/// runs and the demo binary.
#[derive(Clone, Debug, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Create a new tracing notifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        info!(notice = %message, "✅ Sign-in notice");
    }

    fn notify_error(&self, message: &str) {
        warn!(notice = %message, "⚠️ Sign-in notice");
    }
}
