//! Sign-in trigger facade.
//!
//! [`LoginTrigger`] owns a [`Store`] running the [`LoginTriggerReducer`] and
//! exposes the button's operations: activate, observe, render.

use crate::actions::TriggerAction;
use crate::environment::TriggerEnvironment;
use crate::providers::{IdentityPopup, Notifier, SessionGateway};
use crate::reducer::LoginTriggerReducer;
use crate::state::{Outcome, TriggerState};
use crate::view::ButtonView;
use signin_core::environment::Clock;
use signin_runtime::{Store, StoreConfig, StoreError};
use std::time::Duration;
use uuid::Uuid;

/// Store type driving one trigger.
pub type TriggerStore<P, S, N, C> = Store<
    TriggerState,
    TriggerAction,
    TriggerEnvironment<P, S, N, C>,
    LoginTriggerReducer<P, S, N, C>,
>;

/// How an awaited activation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The attempt ran and finished.
    Finished(Outcome),
    /// The trigger was disabled and the activation was dropped.
    Ignored,
}

/// A sign-in button backed by a store.
///
/// Cloning is cheap: clones share the same store.
///
/// # Example
///
/// ```ignore
/// let trigger = LoginTrigger::new(env);
/// match trigger.activate_and_wait(Duration::from_secs(60)).await? {
///     Activation::Finished(outcome) => println!("{outcome:?}"),
///     Activation::Ignored => println!("already signing in"),
/// }
/// ```
pub struct LoginTrigger<P, S, N, C>
where
    P: IdentityPopup + Clone + 'static,
    S: SessionGateway + Clone + 'static,
    N: Notifier + Clone + 'static,
    C: Clock + Clone + 'static,
{
    store: TriggerStore<P, S, N, C>,
}

impl<P, S, N, C> Clone for LoginTrigger<P, S, N, C>
where
    P: IdentityPopup + Clone + 'static,
    S: SessionGateway + Clone + 'static,
    N: Notifier + Clone + 'static,
    C: Clock + Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<P, S, N, C> LoginTrigger<P, S, N, C>
where
    P: IdentityPopup + Clone + 'static,
    S: SessionGateway + Clone + 'static,
    N: Notifier + Clone + 'static,
    C: Clock + Clone + 'static,
{
    /// Create an idle trigger.
    #[must_use]
    pub fn new(environment: TriggerEnvironment<P, S, N, C>) -> Self {
        Self::with_config(environment, StoreConfig::default())
    }

    /// Create an idle trigger with a custom store configuration.
    #[must_use]
    pub fn with_config(environment: TriggerEnvironment<P, S, N, C>, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(
                TriggerState::default(),
                LoginTriggerReducer::new(),
                environment,
                config,
            ),
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &TriggerStore<P, S, N, C> {
        &self.store
    }

    /// Activate the button.
    ///
    /// Returns the correlation id of the activation without waiting for the
    /// attempt to finish.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn activate(&self) -> Result<Uuid, StoreError> {
        let correlation_id = Uuid::new_v4();
        self.store.send(TriggerAction::Activate { correlation_id }).await?;
        Ok(correlation_id)
    }

    /// Activate the button and wait until the attempt finishes.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: the attempt did not finish within `timeout`
    /// - [`StoreError::ShutdownInProgress`]: the store is shutting down
    /// - [`StoreError::ChannelClosed`]: the action broadcast closed
    pub async fn activate_and_wait(&self, timeout: Duration) -> Result<Activation, StoreError> {
        let correlation_id = Uuid::new_v4();

        let terminal = self
            .store
            .send_and_wait_for(
                TriggerAction::Activate { correlation_id },
                move |action| action.is_terminal() && action.correlation_id() == Some(correlation_id),
                timeout,
            )
            .await?;

        Ok(match terminal {
            TriggerAction::AttemptFinished { outcome, .. } => Activation::Finished(outcome),
            _ => Activation::Ignored,
        })
    }

    /// Copy the session store's loading indicator into the trigger state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn sync_external_loading(&self) -> Result<bool, StoreError> {
        let loading = self.store.environment().session.is_loading();
        self.store
            .send(TriggerAction::ExternalLoadingChanged { loading })
            .await?;
        Ok(loading)
    }

    /// Current button view.
    ///
    /// Uses the session store's live loading indicator rather than the
    /// last synced value.
    pub async fn view(&self) -> ButtonView {
        let env = self.store.environment();
        let external_loading = env.session.is_loading();
        self.store
            .state(|state| ButtonView::render_with_external(state, external_loading, &env.config))
            .await
    }

    /// Whether an attempt is in flight.
    pub async fn is_loading(&self) -> bool {
        self.store.state(TriggerState::is_loading).await
    }

    /// Whether activation is currently a no-op.
    pub async fn is_disabled(&self) -> bool {
        self.store.environment().session.is_loading() || self.is_loading().await
    }

    /// Outcome of the most recent finished attempt.
    pub async fn last_outcome(&self) -> Option<Outcome> {
        self.store.state(|state| state.last_outcome.clone()).await
    }

    /// Snapshot of the full state.
    pub async fn snapshot(&self) -> TriggerState {
        self.store.state(TriggerState::clone).await
    }

    /// Stop accepting activations and wait for running effects.
    ///
    /// An attempt already in flight still settles: its popup and session
    /// results are reduced, its notice is shown, and the button returns to
    /// idle before this resolves.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// after `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}
