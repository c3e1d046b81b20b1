//! Mock identity popup.

use super::lock;
use crate::credential::{Credential, ProviderKind};
use crate::error::ProviderError;
use crate::providers::IdentityPopup;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// What the mock popup does when opened.
#[derive(Debug, Clone)]
pub enum PopupBehaviour {
    /// Resolve with this credential.
    Resolve(Credential),
    /// Fail with this error.
    Fail(ProviderError),
    /// Panic inside the popup future.
    Panic,
}

/// Mock identity popup.
///
/// Returns a scripted result, counts how often it was opened, and can be held
/// open until the test releases it.
#[derive(Debug, Clone)]
pub struct MockIdentityPopup {
    behaviour: Arc<Mutex<PopupBehaviour>>,
    calls: Arc<AtomicUsize>,
    providers: Arc<Mutex<Vec<ProviderKind>>>,
    gate: Option<Arc<Semaphore>>,
}

impl MockIdentityPopup {
    fn with_behaviour(behaviour: PopupBehaviour) -> Self {
        Self {
            behaviour: Arc::new(Mutex::new(behaviour)),
            calls: Arc::new(AtomicUsize::new(0)),
            providers: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// A popup that resolves with a fixed test credential.
    #[must_use]
    pub fn new() -> Self {
        Self::resolving(Self::test_credential())
    }

    /// A popup that resolves with `credential`.
    #[must_use]
    pub fn resolving(credential: Credential) -> Self {
        Self::with_behaviour(PopupBehaviour::Resolve(credential))
    }

    /// A popup that fails with `error`.
    #[must_use]
    pub fn failing(error: ProviderError) -> Self {
        Self::with_behaviour(PopupBehaviour::Fail(error))
    }

    /// A popup whose future panics.
    #[must_use]
    pub fn panicking() -> Self {
        Self::with_behaviour(PopupBehaviour::Panic)
    }

    /// Keep the popup open until [`MockIdentityPopup::release`] is called.
    #[must_use]
    pub fn held_open(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let one held popup resolve.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Change what the next popup does.
    pub fn set_behaviour(&self, behaviour: PopupBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// Number of times the popup was opened.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Providers requested, in order.
    #[must_use]
    pub fn providers(&self) -> Vec<ProviderKind> {
        lock(&self.providers).clone()
    }

    /// The credential returned by [`MockIdentityPopup::new`].
    #[must_use]
    pub fn test_credential() -> Credential {
        Credential::new("mock_uid_123", "mock_id_token_456")
            .with_email("test@example.com")
            .with_display_name("Test User")
            .with_photo_url("https://example.com/avatar.jpg")
    }
}

impl Default for MockIdentityPopup {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityPopup for MockIdentityPopup {
    fn request_credential(
        &self,
        provider: ProviderKind,
    ) -> impl Future<Output = Result<Credential, ProviderError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.providers).push(provider);
        let behaviour = lock(&self.behaviour).clone();
        let gate = self.gate.clone();

        async move {
            if let Some(gate) = gate {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
            }

            match behaviour {
                PopupBehaviour::Resolve(credential) => Ok(credential),
                PopupBehaviour::Fail(error) => Err(error),
                #[allow(clippy::panic)] // Scripted failure for tests
                PopupBehaviour::Panic => panic!("mock popup crashed"),
            }
        }
    }
}
