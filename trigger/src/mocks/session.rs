//! Mock session gateway.

use super::lock;
use crate::credential::{LoginRequest, SessionResponse};
use crate::error::ActionError;
use crate::providers::SessionGateway;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock session gateway.
///
/// Answers every request with a scripted result, records the requests it
/// received, and exposes a settable loading indicator standing in for the
/// session store.
#[derive(Debug, Clone)]
pub struct MockSessionGateway {
    result: Arc<Mutex<Result<SessionResponse, ActionError>>>,
    requests: Arc<Mutex<Vec<LoginRequest>>>,
    external_loading: Arc<AtomicBool>,
}

impl MockSessionGateway {
    fn with_result(result: Result<SessionResponse, ActionError>) -> Self {
        Self {
            result: Arc::new(Mutex::new(result)),
            requests: Arc::new(Mutex::new(Vec::new())),
            external_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A gateway that establishes a session and returns `message`.
    #[must_use]
    pub fn welcoming(message: impl Into<String>) -> Self {
        Self::with_result(Ok(SessionResponse::welcome(message)))
    }

    /// A gateway that resolves with `success: false`.
    #[must_use]
    pub fn declining(message: impl Into<String>) -> Self {
        Self::with_result(Ok(SessionResponse::declined(message)))
    }

    /// A gateway that rejects with `message`.
    #[must_use]
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self::with_result(Err(ActionError::new(message)))
    }

    /// Change the result of subsequent requests.
    pub fn set_result(&self, result: Result<SessionResponse, ActionError>) {
        *lock(&self.result) = result;
    }

    /// Set the store's loading indicator.
    pub fn set_external_loading(&self, loading: bool) {
        self.external_loading.store(loading, Ordering::SeqCst);
    }

    /// Requests received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<LoginRequest> {
        lock(&self.requests).clone()
    }

    /// Number of requests received.
    #[must_use]
    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Default for MockSessionGateway {
    fn default() -> Self {
        Self::welcoming("Welcome")
    }
}

impl SessionGateway for MockSessionGateway {
    fn establish_session(
        &self,
        request: LoginRequest,
    ) -> impl Future<Output = Result<SessionResponse, ActionError>> + Send {
        lock(&self.requests).push(request);
        let result = lock(&self.result).clone();

        async move { result }
    }

    fn is_loading(&self) -> bool {
        self.external_loading.load(Ordering::SeqCst)
    }
}
