//! Trigger actions.
//!
//! Every input to the trigger reducer: the user's activation, updates from
//! the session store, and the results of the two suspension points (popup and
//! session action). Results carry the correlation id of the attempt that
//! produced them so late results of an older attempt can be recognised.

use crate::credential::{Credential, SessionResponse};
use crate::error::{ActionError, ProviderError};
use crate::state::Outcome;
use uuid::Uuid;

/// Sign-in trigger action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerAction {
    // ═══════════════════════════════════════════════════════════════════════
    // User / store input
    // ═══════════════════════════════════════════════════════════════════════
    /// The user activated the button.
    Activate {
        /// Correlation id for this attempt.
        correlation_id: Uuid,
    },

    /// The session store's loading indicator changed.
    ExternalLoadingChanged {
        /// New indicator value.
        loading: bool,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Popup results
    // ═══════════════════════════════════════════════════════════════════════
    /// The popup resolved with a credential.
    CredentialReceived {
        /// Attempt the credential belongs to.
        correlation_id: Uuid,
        /// Credential issued by the provider.
        credential: Credential,
    },

    /// The popup was dismissed, blocked, or the provider failed.
    CredentialFailed {
        /// Attempt that failed.
        correlation_id: Uuid,
        /// Provider error.
        error: ProviderError,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Session action results
    // ═══════════════════════════════════════════════════════════════════════
    /// The session action resolved (successfully or with `success: false`).
    SessionSettled {
        /// Attempt the response belongs to.
        correlation_id: Uuid,
        /// Response of the action.
        response: SessionResponse,
    },

    /// The session action rejected.
    SessionRejected {
        /// Attempt that failed.
        correlation_id: Uuid,
        /// Rejection.
        error: ActionError,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Terminal
    // ═══════════════════════════════════════════════════════════════════════
    /// The attempt's single notice was delivered.
    AttemptFinished {
        /// Attempt that finished.
        correlation_id: Uuid,
        /// How it ended.
        outcome: Outcome,
    },

    /// The activation arrived while the trigger was disabled and was dropped.
    ActivationIgnored {
        /// Correlation id of the dropped activation.
        correlation_id: Uuid,
    },
}

impl TriggerAction {
    /// Create an activation with a fresh correlation id.
    #[must_use]
    pub fn activate() -> Self {
        Self::Activate {
            correlation_id: Uuid::new_v4(),
        }
    }

    /// Correlation id carried by this action, if any.
    #[must_use]
    pub const fn correlation_id(&self) -> Option<Uuid> {
        match self {
            Self::Activate { correlation_id }
            | Self::CredentialReceived { correlation_id, .. }
            | Self::CredentialFailed { correlation_id, .. }
            | Self::SessionSettled { correlation_id, .. }
            | Self::SessionRejected { correlation_id, .. }
            | Self::AttemptFinished { correlation_id, .. }
            | Self::ActivationIgnored { correlation_id } => Some(*correlation_id),
            Self::ExternalLoadingChanged { .. } => None,
        }
    }

    /// Returns `true` for actions that end an activation.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::AttemptFinished { .. } | Self::ActivationIgnored { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activations_get_distinct_ids() {
        let a = TriggerAction::activate();
        let b = TriggerAction::activate();
        assert_ne!(a.correlation_id(), b.correlation_id());
        assert!(!a.is_terminal());
    }

    #[test]
    fn terminal_actions() {
        let id = Uuid::new_v4();
        assert!(TriggerAction::ActivationIgnored { correlation_id: id }.is_terminal());
        assert!(
            TriggerAction::AttemptFinished {
                correlation_id: id,
                outcome: Outcome::SignedIn {
                    message: "Welcome".to_string()
                },
            }
            .is_terminal()
        );
        assert_eq!(
            TriggerAction::ExternalLoadingChanged { loading: true }.correlation_id(),
            None
        );
    }
}
