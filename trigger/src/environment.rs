//! Trigger environment.
//!
//! Dependencies injected into the trigger reducer.

use crate::config::TriggerConfig;
use crate::providers::{IdentityPopup, Notifier, SessionGateway};
use signin_core::environment::Clock;

/// Sign-in trigger environment.
///
/// # Type Parameters
///
/// - `P`: Identity popup
/// - `S`: Session gateway (action + store loading indicator)
/// - `N`: Notifier
/// - `C`: Clock
#[derive(Clone)]
pub struct TriggerEnvironment<P, S, N, C>
where
    P: IdentityPopup + Clone,
    S: SessionGateway + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    /// Identity popup.
    pub popup: P,

    /// Session-establishment action and store loading indicator.
    pub session: S,

    /// Toast sink.
    pub notifier: N,

    /// Clock used to time attempts.
    pub clock: C,

    /// Texts and provider selection.
    pub config: TriggerConfig,
}

impl<P, S, N, C> TriggerEnvironment<P, S, N, C>
where
    P: IdentityPopup + Clone,
    S: SessionGateway + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    /// Create a new trigger environment.
    #[must_use]
    pub const fn new(popup: P, session: S, notifier: N, clock: C, config: TriggerConfig) -> Self {
        Self {
            popup,
            session,
            notifier,
            clock,
            config,
        }
    }
}
