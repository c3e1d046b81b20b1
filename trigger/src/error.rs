//! Error types for the sign-in trigger.
//!
//! Two kinds of errors cross the trigger's boundary: [`ProviderError`] from
//! the identity popup and [`ActionError`] from the session-establishment
//! action. Both are classified into a [`LoginError`], which decides the one
//! notice the user sees for a failed attempt.

use crate::config::NoticeMessages;
use crate::constants::{INVALID_RESPONSE_MESSAGE, NETWORK_ERROR_MESSAGE, POPUP_BLOCKED, POPUP_CLOSED_BY_USER};
use thiserror::Error;

/// Failure reported by the identity provider popup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("identity provider error {code}")]
pub struct ProviderError {
    /// Provider error code (e.g. `auth/popup-closed-by-user`).
    pub code: String,

    /// Human-readable message supplied by the provider, if any.
    pub message: Option<String>,
}

impl ProviderError {
    /// Create a provider error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: Option<String>) -> Self {
        Self {
            code: code.into(),
            message,
        }
    }

    /// The user closed the popup.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(POPUP_CLOSED_BY_USER, None)
    }

    /// The browser blocked the popup.
    #[must_use]
    pub fn blocked() -> Self {
        Self::new(POPUP_BLOCKED, None)
    }

    /// Any other provider failure with a message.
    #[must_use]
    pub fn other(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Some(message.into()))
    }
}

/// Failure reported by the session-establishment action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("session action rejected: {message}")]
pub struct ActionError {
    /// Rejection message.
    pub message: String,
}

impl ActionError {
    /// Create an action error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// How prominent a failure notice is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected user behaviour, e.g. closing the popup.
    Low,
    /// Something went wrong the user did not ask for.
    High,
}

/// Classified failure of one sign-in attempt.
///
/// Every variant is terminal for the attempt and none is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The user dismissed the provider popup.
    #[error("sign-in popup was dismissed")]
    PopupCancelled,

    /// The browser blocked the provider popup.
    #[error("sign-in popup was blocked")]
    PopupBlocked,

    /// Any other provider-side failure.
    #[error("identity provider failed ({code})")]
    ProviderOther {
        /// Provider error code.
        code: String,
        /// Provider message, if supplied.
        message: Option<String>,
    },

    /// The session action rejected or reported `success: false`.
    #[error("session could not be established")]
    ActionFailure {
        /// Rejection message, if one was supplied.
        message: Option<String>,
    },
}

impl LoginError {
    /// Classify a provider failure by its code.
    #[must_use]
    pub fn from_provider(error: &ProviderError) -> Self {
        match error.code.as_str() {
            POPUP_CLOSED_BY_USER => Self::PopupCancelled,
            POPUP_BLOCKED => Self::PopupBlocked,
            _ => Self::ProviderOther {
                code: error.code.clone(),
                message: non_empty(error.message.clone()),
            },
        }
    }

    /// Classify a rejected session action.
    #[must_use]
    pub fn from_action(error: ActionError) -> Self {
        Self::ActionFailure {
            message: non_empty(Some(error.message)),
        }
    }

    /// Classify a session response that reported `success: false`.
    #[must_use]
    pub fn declined(message: String) -> Self {
        Self::ActionFailure {
            message: non_empty(Some(message)),
        }
    }

    /// The text shown to the user for this failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use signin_trigger::config::NoticeMessages;
    /// use signin_trigger::error::{LoginError, ProviderError};
    ///
    /// let notices = NoticeMessages::default();
    /// let error = LoginError::from_provider(&ProviderError::cancelled());
    /// assert_eq!(error.user_message(&notices), "Sign-in was cancelled");
    ///
    /// let error = LoginError::from_provider(&ProviderError::new("auth/internal-error", None));
    /// assert_eq!(error.user_message(&notices), "Google login failed");
    /// ```
    #[must_use]
    pub fn user_message(&self, notices: &NoticeMessages) -> String {
        match self {
            Self::PopupCancelled => notices.cancelled.clone(),
            Self::PopupBlocked => notices.blocked.clone(),
            Self::ProviderOther { message, .. } | Self::ActionFailure { message } => message
                .clone()
                .unwrap_or_else(|| notices.generic_failure.clone()),
        }
    }

    /// Severity of the notice for this failure.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::PopupCancelled => Severity::Low,
            Self::PopupBlocked | Self::ProviderOther { .. } | Self::ActionFailure { .. } => {
                Severity::High
            },
        }
    }

    /// Stable label used in logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PopupCancelled => "popup_cancelled",
            Self::PopupBlocked => "popup_blocked",
            Self::ProviderOther { .. } => "provider_other",
            Self::ActionFailure { .. } => "action_failure",
        }
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|m| !m.trim().is_empty())
}

/// Errors raised by the HTTP session gateway before they are surfaced as
/// an [`ActionError`].
#[derive(Debug, Error)]
pub enum HttpGatewayError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// The request never produced a response.
    #[error("Network error: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("Backend rejected sign-in (status {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response body was not a session response.
    #[error("Invalid session response: {0}")]
    ResponseParseFailed(String),
}

/// Only the backend's own rejection message reaches the user; transport and
/// parse details stay in the log.
impl From<HttpGatewayError> for ActionError {
    fn from(error: HttpGatewayError) -> Self {
        match error {
            HttpGatewayError::Rejected { message, .. } => Self::new(message),
            HttpGatewayError::RequestFailed(detail) => {
                tracing::warn!(%detail, "Session request failed");
                Self::new(NETWORK_ERROR_MESSAGE)
            },
            HttpGatewayError::ResponseParseFailed(detail) => {
                tracing::warn!(%detail, "Session response could not be parsed");
                Self::new(INVALID_RESPONSE_MESSAGE)
            },
            other => {
                tracing::warn!(error = %other, "Session gateway unavailable");
                Self::new(NETWORK_ERROR_MESSAGE)
            },
        }
    }
}

/// Invalid configuration value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    /// An environment variable could not be parsed.
    #[error("Invalid value for {key}: {value}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}
