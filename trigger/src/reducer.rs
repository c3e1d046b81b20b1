//! Sign-in trigger reducer.
//!
//! Pure state machine for one sign-in button.
//!
//! # Flow
//!
//! ```text
//! 1. Activate → refresh external loading from the gateway
//!             → disabled? → ActivationIgnored
//!             → Authenticating → request_credential effect
//! 2. CredentialReceived → establish_session effect
//!    CredentialFailed   → Idle → error notice
//! 3. SessionSettled     → Idle → success notice (or error if success: false)
//!    SessionRejected    → Idle → error notice
//! 4. AttemptFinished    → last_outcome recorded
//! ```
//!
//! Every path out of `Authenticating` returns to `Idle` and emits exactly one
//! notice effect.

use crate::actions::TriggerAction;
use crate::credential::{LoginRequest, SessionResponse};
use crate::effects;
use crate::environment::TriggerEnvironment;
use crate::error::LoginError;
use crate::metrics::SignInMetrics;
use crate::providers::{IdentityPopup, Notice, Notifier, SessionGateway};
use crate::state::{Outcome, Phase, TriggerState};
use signin_core::effect::Effect;
use signin_core::environment::Clock;
use signin_core::reducer::Reducer;
use signin_core::{SmallVec, smallvec};
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

type Effects = SmallVec<[Effect<TriggerAction>; 4]>;

/// Sign-in trigger reducer.
///
/// Stateless; generic over the environment's collaborators.
pub struct LoginTriggerReducer<P, S, N, C> {
    _marker: PhantomData<fn() -> (P, S, N, C)>,
}

impl<P, S, N, C> LoginTriggerReducer<P, S, N, C> {
    /// Create a new trigger reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P, S, N, C> Clone for LoginTriggerReducer<P, S, N, C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<P, S, N, C> Default for LoginTriggerReducer<P, S, N, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S, N, C> std::fmt::Debug for LoginTriggerReducer<P, S, N, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginTriggerReducer").finish()
    }
}

impl<P, S, N, C> LoginTriggerReducer<P, S, N, C>
where
    P: IdentityPopup + Clone + 'static,
    S: SessionGateway + Clone + 'static,
    N: Notifier + Clone + 'static,
    C: Clock + Clone,
{
    fn activate(state: &mut TriggerState, correlation_id: Uuid, env: &TriggerEnvironment<P, S, N, C>) -> Effects {
        let external_loading = env.session.is_loading();
        state.external_loading = external_loading;

        if state.is_loading() || external_loading {
            debug!(
                %correlation_id,
                loading = state.is_loading(),
                external_loading,
                "Trigger disabled, ignoring activation"
            );
            SignInMetrics::record_ignored();
            return smallvec![effects::activation_ignored(correlation_id)];
        }

        state.phase = Phase::Authenticating {
            correlation_id,
            started_at: env.clock.now(),
        };
        SignInMetrics::record_attempt();
        info!(%correlation_id, provider = %env.config.provider, "Opening sign-in popup");

        smallvec![effects::request_credential(&env.popup, env.config.provider, correlation_id)]
    }

    /// Leave `Authenticating` with a failure and emit its notice.
    fn fail(
        state: &mut TriggerState,
        correlation_id: Uuid,
        error: LoginError,
        env: &TriggerEnvironment<P, S, N, C>,
    ) -> Effects {
        let duration = Self::settle(state, env);
        let message = error.user_message(&env.config.notices);

        warn!(%correlation_id, kind = error.kind(), severity = ?error.severity(), %message, "Sign-in failed");
        SignInMetrics::record_outcome(error.kind(), duration);

        smallvec![effects::notify(
            &env.notifier,
            Notice::Error(message),
            correlation_id,
            Outcome::Failed(error),
        )]
    }

    /// Leave `Authenticating` with an established session.
    fn succeed(
        state: &mut TriggerState,
        correlation_id: Uuid,
        response: SessionResponse,
        env: &TriggerEnvironment<P, S, N, C>,
    ) -> Effects {
        let duration = Self::settle(state, env);

        info!(%correlation_id, "Signed in");
        SignInMetrics::record_outcome("signed_in", duration);

        smallvec![effects::notify(
            &env.notifier,
            Notice::Success(response.message.clone()),
            correlation_id,
            Outcome::SignedIn {
                message: response.message,
            },
        )]
    }

    /// Return to `Idle`, yielding how long the attempt took.
    fn settle(state: &mut TriggerState, env: &TriggerEnvironment<P, S, N, C>) -> Option<Duration> {
        let started_at = match std::mem::take(&mut state.phase) {
            Phase::Authenticating { started_at, .. } => started_at,
            Phase::Idle => return None,
        };
        (env.clock.now() - started_at).to_std().ok()
    }

    fn stale(state: &TriggerState, correlation_id: Uuid, action: &'static str) -> bool {
        if state.is_current(correlation_id) {
            return false;
        }
        warn!(
            %correlation_id,
            in_flight = ?state.in_flight(),
            action,
            "Dropping result of a stale sign-in attempt"
        );
        true
    }
}

impl<P, S, N, C> Reducer for LoginTriggerReducer<P, S, N, C>
where
    P: IdentityPopup + Clone + 'static,
    S: SessionGateway + Clone + 'static,
    N: Notifier + Clone + 'static,
    C: Clock + Clone,
{
    type State = TriggerState;
    type Action = TriggerAction;
    type Environment = TriggerEnvironment<P, S, N, C>;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) -> Effects {
        match action {
            TriggerAction::Activate { correlation_id } => Self::activate(state, correlation_id, env),

            TriggerAction::ExternalLoadingChanged { loading } => {
                state.external_loading = loading;
                smallvec![Effect::None]
            },

            TriggerAction::CredentialReceived {
                correlation_id,
                credential,
            } => {
                if Self::stale(state, correlation_id, "credential_received") {
                    return smallvec![Effect::None];
                }
                debug!(%correlation_id, uid = %credential.uid, "Credential received, establishing session");
                let request = LoginRequest::from_credential(credential);
                smallvec![effects::establish_session(&env.session, request, correlation_id)]
            },

            TriggerAction::CredentialFailed {
                correlation_id,
                error,
            } => {
                if Self::stale(state, correlation_id, "credential_failed") {
                    return smallvec![Effect::None];
                }
                Self::fail(state, correlation_id, LoginError::from_provider(&error), env)
            },

            TriggerAction::SessionSettled {
                correlation_id,
                response,
            } => {
                if Self::stale(state, correlation_id, "session_settled") {
                    return smallvec![Effect::None];
                }
                if response.success {
                    Self::succeed(state, correlation_id, response, env)
                } else {
                    Self::fail(state, correlation_id, LoginError::declined(response.message), env)
                }
            },

            TriggerAction::SessionRejected {
                correlation_id,
                error,
            } => {
                if Self::stale(state, correlation_id, "session_rejected") {
                    return smallvec![Effect::None];
                }
                Self::fail(state, correlation_id, LoginError::from_action(error), env)
            },

            TriggerAction::AttemptFinished { outcome, .. } => {
                state.last_outcome = Some(outcome);
                state.completed_attempts += 1;
                smallvec![Effect::None]
            },

            TriggerAction::ActivationIgnored { .. } => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::TriggerConfig;
    use crate::credential::ProviderKind;
    use crate::error::{ActionError, ProviderError};
    use crate::mocks::{MockIdentityPopup, MockSessionGateway, RecordingNotifier};
    use proptest::prelude::*;
    use signin_testing::{FixedClock, ReducerTest, assertions, run_effects, test_clock};

    type TestReducer = LoginTriggerReducer<MockIdentityPopup, MockSessionGateway, RecordingNotifier, FixedClock>;
    type TestEnv = TriggerEnvironment<MockIdentityPopup, MockSessionGateway, RecordingNotifier, FixedClock>;

    fn test_env() -> TestEnv {
        TriggerEnvironment::new(
            MockIdentityPopup::new(),
            MockSessionGateway::welcoming("Welcome"),
            RecordingNotifier::new(),
            test_clock(),
            TriggerConfig::default(),
        )
    }

    fn authenticating(id: Uuid) -> TriggerState {
        TriggerState {
            phase: Phase::Authenticating {
                correlation_id: id,
                started_at: test_clock().now(),
            },
            ..TriggerState::default()
        }
    }

    #[test]
    fn activation_enters_authenticating() {
        let id = Uuid::new_v4();
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(TriggerState::default())
            .when_action(TriggerAction::Activate { correlation_id: id })
            .then_state(move |state| {
                assert!(state.is_loading());
                assert!(state.is_current(id));
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn activation_while_loading_is_ignored() {
        let first = Uuid::new_v4();
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(authenticating(first))
            .when_action(TriggerAction::activate())
            .then_state(move |state| {
                assert!(state.is_current(first));
            })
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .then_feedback(|actions| {
                assert!(matches!(actions, [TriggerAction::ActivationIgnored { .. }]));
            })
            .run();
    }

    #[test]
    fn activation_while_store_loading_is_ignored() {
        let env = test_env();
        env.session.set_external_loading(true);

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(TriggerState::default())
            .when_action(TriggerAction::activate())
            .then_state(|state| {
                assert!(!state.is_loading());
                assert!(state.external_loading);
            })
            .run();
    }

    #[test]
    fn stale_external_loading_is_refreshed_on_activation() {
        let id = Uuid::new_v4();
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(TriggerState {
                external_loading: true,
                ..TriggerState::default()
            })
            .when_action(TriggerAction::Activate { correlation_id: id })
            .then_state(move |state| {
                assert!(!state.external_loading);
                assert!(state.is_current(id));
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn external_loading_change_is_recorded() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(TriggerState::default())
            .when_action(TriggerAction::ExternalLoadingChanged { loading: true })
            .then_state(|state| {
                assert!(state.is_disabled());
                assert!(!state.is_loading());
            })
            .then_effects(|effects| assertions::assert_no_future_effect(effects))
            .run();
    }

    #[test]
    fn stale_results_are_dropped() {
        let current = Uuid::new_v4();
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(authenticating(current))
            .when_action(TriggerAction::CredentialFailed {
                correlation_id: Uuid::new_v4(),
                error: ProviderError::cancelled(),
            })
            .then_state(move |state| assert!(state.is_current(current)))
            .then_effects(|effects| assertions::assert_no_future_effect(effects))
            .run();
    }

    #[test]
    fn attempt_finished_records_outcome() {
        let outcome = Outcome::Failed(LoginError::PopupBlocked);
        let expected = outcome.clone();
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(TriggerState::default())
            .when_action(TriggerAction::AttemptFinished {
                correlation_id: Uuid::new_v4(),
                outcome,
            })
            .then_state(move |state| {
                assert_eq!(state.last_outcome, Some(expected.clone()));
                assert_eq!(state.completed_attempts, 1);
            })
            .run();
    }

    #[tokio::test]
    async fn cancelled_popup_returns_to_idle_with_one_notice() {
        let env = test_env();
        let reducer = TestReducer::new();
        let id = Uuid::new_v4();
        let mut state = authenticating(id);

        let effects = reducer.reduce(
            &mut state,
            TriggerAction::CredentialFailed {
                correlation_id: id,
                error: ProviderError::cancelled(),
            },
            &env,
        );
        assert!(!state.is_loading());

        let actions = run_effects(effects).await;
        assert_eq!(env.notifier.errors(), vec!["Sign-in was cancelled".to_string()]);
        assert!(env.notifier.successes().is_empty());
        assert_eq!(
            actions,
            vec![TriggerAction::AttemptFinished {
                correlation_id: id,
                outcome: Outcome::Failed(LoginError::PopupCancelled),
            }]
        );
        assert_eq!(env.session.calls(), 0);
    }

    #[tokio::test]
    async fn declined_response_is_an_error_notice() {
        let env = test_env();
        let id = Uuid::new_v4();
        let mut state = authenticating(id);

        let effects = TestReducer::new().reduce(
            &mut state,
            TriggerAction::SessionSettled {
                correlation_id: id,
                response: SessionResponse::declined("Account disabled"),
            },
            &env,
        );
        run_effects(effects).await;

        assert!(!state.is_loading());
        assert_eq!(env.notifier.errors(), vec!["Account disabled".to_string()]);
    }

    #[tokio::test]
    async fn credential_is_forwarded_to_the_session_action() {
        let env = test_env();
        let id = Uuid::new_v4();
        let mut state = authenticating(id);
        let credential = MockIdentityPopup::test_credential();

        let effects = TestReducer::new().reduce(
            &mut state,
            TriggerAction::CredentialReceived {
                correlation_id: id,
                credential: credential.clone(),
            },
            &env,
        );
        assert!(state.is_loading());

        let actions = run_effects(effects).await;
        assert_eq!(env.session.requests(), vec![LoginRequest::from_credential(credential)]);
        assert_eq!(
            actions,
            vec![TriggerAction::SessionSettled {
                correlation_id: id,
                response: SessionResponse::welcome("Welcome"),
            }]
        );
    }

    /// Drive one activation to completion through the reducer alone.
    async fn drive(env: &TestEnv, state: &mut TriggerState) -> usize {
        let reducer = TestReducer::new();
        let mut pending = vec![TriggerAction::activate()];
        let mut steps = 0;

        while let Some(action) = pending.pop() {
            steps += 1;
            let effects = reducer.reduce(state, action, env);
            pending.extend(run_effects(effects).await);
        }
        steps
    }

    fn provider_outcome() -> impl Strategy<Value = Result<(), ProviderError>> {
        prop_oneof![
            Just(Ok(())),
            Just(Err(ProviderError::cancelled())),
            Just(Err(ProviderError::blocked())),
            "[a-z/-]{1,20}".prop_map(|code| Err(ProviderError::new(code, None))),
        ]
    }

    fn session_outcome() -> impl Strategy<Value = Result<SessionResponse, ActionError>> {
        prop_oneof![
            "[A-Za-z ]{0,12}".prop_map(|m| Ok(SessionResponse::welcome(m))),
            "[A-Za-z ]{0,12}".prop_map(|m| Ok(SessionResponse::declined(m))),
            "[A-Za-z ]{0,12}".prop_map(|m| Err(ActionError::new(m))),
        ]
    }

    proptest! {
        #[test]
        fn every_attempt_settles_with_exactly_one_notice(
            popup in provider_outcome(),
            session in session_outcome(),
        ) {
            let env = test_env();
            if let Err(error) = popup.clone() {
                env.popup.set_behaviour(crate::mocks::PopupBehaviour::Fail(error));
            }
            env.session.set_result(session);

            let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
            let mut state = TriggerState::default();
            runtime.block_on(drive(&env, &mut state));

            prop_assert!(!state.is_loading());
            prop_assert_eq!(state.completed_attempts, 1);
            prop_assert_eq!(env.notifier.notices().len(), 1);
            prop_assert_eq!(env.popup.providers(), vec![ProviderKind::Google]);
            prop_assert_eq!(env.session.calls(), usize::from(popup.is_ok()));
        }
    }
}
