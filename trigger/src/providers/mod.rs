//! Sign-in providers.
//!
//! Traits for the trigger's three external collaborators. The reducer depends
//! only on these traits; the application chooses the implementations.
//!
//! ```text
//!  Activate ──► IdentityPopup::request_credential ──► Credential
//!                                                       │
//!                                                       ▼ LoginRequest
//!               SessionGateway::establish_session ◄─────┘
//!                         │
//!                         ▼
//!               Notifier::notify_success / notify_error
//! ```
//!
//! This enables:
//! - **Testing**: Use mocks (in-memory, scripted)
//! - **Production**: Use a real popup bridge and [`HttpSessionGateway`]
//! - **Development**: Use [`TracingNotifier`] to see notices in the logs

use crate::credential::{Credential, LoginRequest, ProviderKind, SessionResponse};
use crate::error::{ActionError, ProviderError};
use std::future::Future;

pub mod http_session;
pub mod tracing_notifier;

pub use http_session::HttpSessionGateway;
pub use tracing_notifier::TracingNotifier;

/// Interactive identity popup.
///
/// Suspends until the provider's popup resolves or is dismissed.
pub trait IdentityPopup: Send + Sync {
    /// Open the provider popup and wait for a credential.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the user cancels, the popup is blocked,
    /// or the provider rejects the sign-in.
    fn request_credential(
        &self,
        provider: ProviderKind,
    ) -> impl Future<Output = Result<Credential, ProviderError>> + Send;
}

/// Session-establishment action and the loading indicator of the store that
/// owns the application session.
pub trait SessionGateway: Send + Sync {
    /// Exchange a login request for an application session.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the action rejects. A resolved response
    /// with `success: false` is returned as `Ok`.
    fn establish_session(
        &self,
        request: LoginRequest,
    ) -> impl Future<Output = Result<SessionResponse, ActionError>> + Send;

    /// Whether the session store is currently loading.
    fn is_loading(&self) -> bool;
}

/// Fire-and-forget user notifications (toasts).
pub trait Notifier: Send + Sync {
    /// Show a success notice.
    fn notify_success(&self, message: &str);

    /// Show an error notice.
    fn notify_error(&self, message: &str);
}

/// A notice to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Success notice.
    Success(String),
    /// Error notice.
    Error(String),
}

impl Notice {
    /// Text of the notice.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    /// Hand the notice to a notifier.
    pub fn deliver<N: Notifier + ?Sized>(&self, notifier: &N) {
        match self {
            Self::Success(message) => notifier.notify_success(message),
            Self::Error(message) => notifier.notify_error(message),
        }
    }
}
