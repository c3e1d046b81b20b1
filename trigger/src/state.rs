//! Trigger state.

use crate::error::LoginError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Where the trigger is in its two-state lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for activation.
    #[default]
    Idle,

    /// An attempt is in flight (popup open or session action pending).
    Authenticating {
        /// Correlation id of the attempt.
        correlation_id: Uuid,
        /// When the attempt started.
        started_at: DateTime<Utc>,
    },
}

impl Phase {
    /// Returns `true` while an attempt is in flight.
    #[must_use]
    pub const fn is_authenticating(&self) -> bool {
        matches!(self, Self::Authenticating { .. })
    }
}

/// How a finished attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A session was established.
    SignedIn {
        /// Message returned by the session action.
        message: String,
    },

    /// The attempt failed.
    Failed(LoginError),
}

impl Outcome {
    /// Returns `true` if a session was established.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }
}

/// State of one trigger instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerState {
    /// Current phase; the loading flag is `phase.is_authenticating()`.
    pub phase: Phase,

    /// Loading indicator last observed from the session store.
    pub external_loading: bool,

    /// Outcome of the most recent finished attempt.
    pub last_outcome: Option<Outcome>,

    /// Number of attempts that reached a terminal outcome.
    pub completed_attempts: u64,
}

impl TriggerState {
    /// The component-local loading flag.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.phase.is_authenticating()
    }

    /// Whether the button is disabled according to the recorded external
    /// loading value.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.is_loading() || self.external_loading
    }

    /// Correlation id of the in-flight attempt.
    #[must_use]
    pub const fn in_flight(&self) -> Option<Uuid> {
        match self.phase {
            Phase::Authenticating { correlation_id, .. } => Some(correlation_id),
            Phase::Idle => None,
        }
    }

    /// Returns `true` if `correlation_id` identifies the in-flight attempt.
    #[must_use]
    pub fn is_current(&self, correlation_id: Uuid) -> bool {
        self.in_flight() == Some(correlation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_is_enabled() {
        let state = TriggerState::default();
        assert!(!state.is_loading());
        assert!(!state.is_disabled());
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn external_loading_disables_without_local_loading() {
        let state = TriggerState {
            external_loading: true,
            ..TriggerState::default()
        };
        assert!(!state.is_loading());
        assert!(state.is_disabled());
    }

    #[test]
    fn authenticating_tracks_its_attempt() {
        let id = Uuid::new_v4();
        let state = TriggerState {
            phase: Phase::Authenticating {
                correlation_id: id,
                started_at: Utc::now(),
            },
            ..TriggerState::default()
        };
        assert!(state.is_loading());
        assert!(state.is_current(id));
        assert!(!state.is_current(Uuid::new_v4()));
    }
}
