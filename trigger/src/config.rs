//! Trigger configuration.
//!
//! Texts and provider selection for the trigger, and the backend endpoint
//! used by the HTTP session gateway. Values are supplied by the application;
//! the defaults match the Google sign-in button.

use crate::constants::{
    BLOCKED_NOTICE, CANCELLED_NOTICE, DEFAULT_LOGIN_PATH, DEFAULT_SESSION_TIMEOUT_SECS,
    GENERIC_FAILURE_NOTICE, IDLE_LABEL, LOADING_LABEL,
};
use crate::credential::ProviderKind;
use crate::error::ConfigError;
use std::time::Duration;

/// Texts of the failure notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeMessages {
    /// Shown when the user dismissed the popup.
    pub cancelled: String,
    /// Shown when the popup was blocked.
    pub blocked: String,
    /// Shown when a failure carries no message.
    pub generic_failure: String,
}

impl NoticeMessages {
    /// Default notices for `provider`; the fallback failure names it.
    #[must_use]
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            generic_failure: format!("{provider} login failed"),
            ..Self::default()
        }
    }

    /// Set the cancellation notice.
    #[must_use]
    pub fn with_cancelled(mut self, text: impl Into<String>) -> Self {
        self.cancelled = text.into();
        self
    }

    /// Set the blocked-popup notice.
    #[must_use]
    pub fn with_blocked(mut self, text: impl Into<String>) -> Self {
        self.blocked = text.into();
        self
    }

    /// Set the fallback failure notice.
    #[must_use]
    pub fn with_generic_failure(mut self, text: impl Into<String>) -> Self {
        self.generic_failure = text.into();
        self
    }
}

impl Default for NoticeMessages {
    fn default() -> Self {
        Self {
            cancelled: CANCELLED_NOTICE.to_string(),
            blocked: BLOCKED_NOTICE.to_string(),
            generic_failure: GENERIC_FAILURE_NOTICE.to_string(),
        }
    }
}

/// Sign-in trigger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Provider requested from the popup.
    pub provider: ProviderKind,

    /// Failure notice texts.
    pub notices: NoticeMessages,

    /// Button label while idle.
    ///
    /// Default: "Continue with Google"
    pub idle_label: String,

    /// Button label while loading.
    ///
    /// Default: "Signing in..."
    pub loading_label: String,
}

impl TriggerConfig {
    /// Create a configuration for the given provider.
    ///
    /// The idle label and the fallback failure notice name the provider.
    #[must_use]
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            notices: NoticeMessages::for_provider(provider),
            idle_label: format!("Continue with {provider}"),
            loading_label: LOADING_LABEL.to_string(),
        }
    }

    /// Set the notice texts.
    #[must_use]
    pub fn with_notices(mut self, notices: NoticeMessages) -> Self {
        self.notices = notices;
        self
    }

    /// Set the idle label.
    #[must_use]
    pub fn with_idle_label(mut self, label: impl Into<String>) -> Self {
        self.idle_label = label.into();
        self
    }

    /// Set the loading label.
    #[must_use]
    pub fn with_loading_label(mut self, label: impl Into<String>) -> Self {
        self.loading_label = label.into();
        self
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Google,
            notices: NoticeMessages::default(),
            idle_label: IDLE_LABEL.to_string(),
            loading_label: LOADING_LABEL.to_string(),
        }
    }
}

/// Backend endpoint used by [`crate::providers::HttpSessionGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEndpointConfig {
    /// Base URL of the backend (e.g., "https://api.example.com").
    pub base_url: String,

    /// Path that exchanges a login request for a session.
    ///
    /// Default: `/api/auth/google`
    pub login_path: String,

    /// Request timeout.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl SessionEndpointConfig {
    /// Create an endpoint configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS),
        }
    }

    /// Load from the environment.
    ///
    /// - `SIGNIN_BACKEND_URL` (required)
    /// - `SIGNIN_LOGIN_PATH` (default `/api/auth/google`)
    /// - `SIGNIN_TIMEOUT_SECS` (default 30)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the URL is missing or the timeout is not
    /// a number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (see [`SessionEndpointConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Same as [`SessionEndpointConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SIGNIN_BACKEND_URL").ok_or(ConfigError::Missing("SIGNIN_BACKEND_URL"))?;
        let mut config = Self::new(base_url);

        if let Some(path) = lookup("SIGNIN_LOGIN_PATH") {
            config.login_path = path;
        }

        if let Some(raw) = lookup("SIGNIN_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: "SIGNIN_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the login path.
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the login endpoint.
    #[must_use]
    pub fn login_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.login_path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_matches_google_button() {
        let config = TriggerConfig::default();
        assert_eq!(config.provider, ProviderKind::Google);
        assert_eq!(config.idle_label, "Continue with Google");
        assert_eq!(config.loading_label, "Signing in...");
        assert_eq!(TriggerConfig::new(ProviderKind::Google), config);
    }

    #[test]
    fn provider_names_the_idle_label_and_fallback_notice() {
        let config = TriggerConfig::new(ProviderKind::GitHub);
        assert_eq!(config.idle_label, "Continue with GitHub");
        assert_eq!(config.notices.generic_failure, "GitHub login failed");
        assert_eq!(config.notices.cancelled, "Sign-in was cancelled");
        assert_eq!(NoticeMessages::for_provider(ProviderKind::Google), NoticeMessages::default());
    }

    #[test]
    fn login_url_joins_without_double_slash() {
        let config = SessionEndpointConfig::new("http://localhost:8080/").with_login_path("/auth/google");
        assert_eq!(config.login_url(), "http://localhost:8080/auth/google");
    }

    #[test]
    fn from_lookup_reads_overrides() {
        let config = SessionEndpointConfig::from_lookup(lookup(&[
            ("SIGNIN_BACKEND_URL", "https://api.example.com"),
            ("SIGNIN_LOGIN_PATH", "/session"),
            ("SIGNIN_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.login_url(), "https://api.example.com/session");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn from_lookup_requires_backend_url() {
        let error = SessionEndpointConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(error, ConfigError::Missing("SIGNIN_BACKEND_URL"));
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let error = SessionEndpointConfig::from_lookup(lookup(&[
            ("SIGNIN_BACKEND_URL", "https://api.example.com"),
            ("SIGNIN_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { key: "SIGNIN_TIMEOUT_SECS", .. }));
    }
}
