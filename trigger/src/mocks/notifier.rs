//! Recording notifier.

use super::lock;
use crate::providers::{Notice, Notifier};
use std::sync::{Arc, Mutex};

/// Notifier that records every notice instead of showing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices, in delivery order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    /// Texts of the success notices.
    #[must_use]
    pub fn successes(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Success(message) => Some(message),
                Notice::Error(_) => None,
            })
            .collect()
    }

    /// Texts of the error notices.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(message) => Some(message),
                Notice::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_success(&self, message: &str) {
        lock(&self.notices).push(Notice::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        lock(&self.notices).push(Notice::Error(message.to_string()));
    }
}
