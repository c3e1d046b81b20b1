//! Button view model.
//!
//! What the sign-in button shows for a given state. Rendering is left to the
//! host UI; this only decides the disabled flag, the indicator, and the label.

use crate::config::TriggerConfig;
use crate::credential::ProviderKind;
use crate::state::TriggerState;

/// Indicator drawn next to the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Busy spinner.
    Spinner,
    /// The provider's logo.
    ProviderIcon(ProviderKind),
}

/// Rendered button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    /// Whether the button ignores activation.
    pub disabled: bool,
    /// Spinner or provider icon.
    pub indicator: Indicator,
    /// Button text.
    pub label: String,
}

impl ButtonView {
    /// Render the button for `state`.
    ///
    /// The button looks busy whenever it is disabled, whether the local
    /// attempt or the session store is loading.
    ///
    /// # Examples
    ///
    /// ```
    /// use signin_trigger::config::TriggerConfig;
    /// use signin_trigger::state::TriggerState;
    /// use signin_trigger::view::{ButtonView, Indicator};
    ///
    /// let view = ButtonView::render(&TriggerState::default(), &TriggerConfig::default());
    /// assert!(!view.disabled);
    /// assert_eq!(view.label, "Continue with Google");
    /// assert!(matches!(view.indicator, Indicator::ProviderIcon(_)));
    /// ```
    #[must_use]
    pub fn render(state: &TriggerState, config: &TriggerConfig) -> Self {
        Self::render_with_external(state, state.external_loading, config)
    }

    /// Render the button using `external_loading` in place of the value
    /// recorded in `state`.
    #[must_use]
    pub fn render_with_external(state: &TriggerState, external_loading: bool, config: &TriggerConfig) -> Self {
        let busy = state.is_loading() || external_loading;

        if busy {
            Self {
                disabled: true,
                indicator: Indicator::Spinner,
                label: config.loading_label.clone(),
            }
        } else {
            Self {
                disabled: false,
                indicator: Indicator::ProviderIcon(config.provider),
                label: config.idle_label.clone(),
            }
        }
    }
}

impl std::fmt::Display for ButtonView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.indicator {
            Indicator::Spinner => "⟳",
            Indicator::ProviderIcon(provider) => provider.glyph(),
        };
        let state = if self.disabled { " (disabled)" } else { "" };
        write!(f, "[{icon} {}]{state}", self.label)
    }
}
