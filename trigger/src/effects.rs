//! Trigger effects.
//!
//! Constructors for the effects the trigger reducer returns. Each one wraps a
//! call to an external collaborator in an [`Effect::Future`] that always
//! produces the follow-up action, even if the collaborator panics, so the
//! reducer is guaranteed to see the attempt settle.

use crate::actions::TriggerAction;
use crate::credential::{LoginRequest, ProviderKind};
use crate::error::{ActionError, ProviderError};
use crate::providers::{IdentityPopup, Notice, Notifier, SessionGateway};
use crate::state::Outcome;
use futures::FutureExt;
use signin_core::effect::Effect;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use uuid::Uuid;

/// Provider code used when the popup future panics.
pub const POPUP_PANICKED: &str = "internal/popup-panicked";

/// Run `fut`, turning a panic into `on_panic()`.
///
/// Plays the role of a `finally` block: the returned future resolves to an
/// action on every path.
async fn settle<F, P>(fut: F, on_panic: P) -> TriggerAction
where
    F: Future<Output = TriggerAction> + Send,
    P: FnOnce() -> TriggerAction,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(action) => action,
        Err(_) => {
            tracing::error!("External sign-in call panicked");
            on_panic()
        },
    }
}

/// Open the identity popup for `provider`.
///
/// Produces [`TriggerAction::CredentialReceived`] or
/// [`TriggerAction::CredentialFailed`].
pub fn request_credential<P>(popup: &P, provider: ProviderKind, correlation_id: Uuid) -> Effect<TriggerAction>
where
    P: IdentityPopup + Clone + 'static,
{
    let popup = popup.clone();

    Effect::future(async move {
        let action = settle(
            async move {
                match popup.request_credential(provider).await {
                    Ok(credential) => TriggerAction::CredentialReceived {
                        correlation_id,
                        credential,
                    },
                    Err(error) => TriggerAction::CredentialFailed {
                        correlation_id,
                        error,
                    },
                }
            },
            move || TriggerAction::CredentialFailed {
                correlation_id,
                error: ProviderError::new(POPUP_PANICKED, None),
            },
        )
        .await;
        Some(action)
    })
}

/// Invoke the session-establishment action.
///
/// Produces [`TriggerAction::SessionSettled`] or
/// [`TriggerAction::SessionRejected`].
pub fn establish_session<S>(session: &S, request: LoginRequest, correlation_id: Uuid) -> Effect<TriggerAction>
where
    S: SessionGateway + Clone + 'static,
{
    let session = session.clone();

    Effect::future(async move {
        let action = settle(
            async move {
                match session.establish_session(request).await {
                    Ok(response) => TriggerAction::SessionSettled {
                        correlation_id,
                        response,
                    },
                    Err(error) => TriggerAction::SessionRejected {
                        correlation_id,
                        error,
                    },
                }
            },
            move || TriggerAction::SessionRejected {
                correlation_id,
                error: ActionError::new(String::new()),
            },
        )
        .await;
        Some(action)
    })
}

/// Deliver the attempt's notice, then report the attempt as finished.
///
/// Produces [`TriggerAction::AttemptFinished`] even if the notifier panics.
pub fn notify<N>(notifier: &N, notice: Notice, correlation_id: Uuid, outcome: Outcome) -> Effect<TriggerAction>
where
    N: Notifier + Clone + 'static,
{
    let notifier = notifier.clone();

    Effect::future(async move {
        let delivered = std::panic::catch_unwind(AssertUnwindSafe(|| notice.deliver(&notifier)));
        if delivered.is_err() {
            tracing::error!("Notifier panicked while showing a sign-in notice");
        }
        Some(TriggerAction::AttemptFinished {
            correlation_id,
            outcome,
        })
    })
}

/// Report a dropped activation to observers.
#[must_use]
pub fn activation_ignored(correlation_id: Uuid) -> Effect<TriggerAction> {
    Effect::future(async move { Some(TriggerAction::ActivationIgnored { correlation_id }) })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::credential::SessionResponse;
    use crate::mocks::{MockIdentityPopup, MockSessionGateway, RecordingNotifier};
    use signin_testing::run_effects;

    #[tokio::test]
    async fn popup_panic_becomes_provider_failure() {
        let id = Uuid::new_v4();
        let actions = run_effects([request_credential(&MockIdentityPopup::panicking(), ProviderKind::Google, id)]).await;

        assert_eq!(
            actions,
            vec![TriggerAction::CredentialFailed {
                correlation_id: id,
                error: ProviderError::new(POPUP_PANICKED, None),
            }]
        );
    }

    #[tokio::test]
    async fn popup_requests_the_configured_provider() {
        let popup = MockIdentityPopup::new();
        let id = Uuid::new_v4();
        let actions = run_effects([request_credential(&popup, ProviderKind::GitHub, id)]).await;

        assert_eq!(popup.providers(), vec![ProviderKind::GitHub]);
        assert!(matches!(
            actions.as_slice(),
            [TriggerAction::CredentialReceived { correlation_id, .. }] if *correlation_id == id
        ));
    }

    #[tokio::test]
    async fn session_result_is_forwarded() {
        let session = MockSessionGateway::welcoming("Welcome");
        let id = Uuid::new_v4();
        let request = LoginRequest::from_credential(MockIdentityPopup::test_credential());
        let actions = run_effects([establish_session(&session, request.clone(), id)]).await;

        assert_eq!(session.requests(), vec![request]);
        assert_eq!(
            actions,
            vec![TriggerAction::SessionSettled {
                correlation_id: id,
                response: SessionResponse::welcome("Welcome"),
            }]
        );
    }

    #[tokio::test]
    async fn notify_delivers_once_and_finishes() {
        let notifier = RecordingNotifier::new();
        let id = Uuid::new_v4();
        let outcome = Outcome::SignedIn {
            message: "Welcome".to_string(),
        };
        let actions = run_effects([notify(&notifier, Notice::Success("Welcome".to_string()), id, outcome.clone())]).await;

        assert_eq!(notifier.successes(), vec!["Welcome".to_string()]);
        assert_eq!(
            actions,
            vec![TriggerAction::AttemptFinished {
                correlation_id: id,
                outcome,
            }]
        );
    }
}
