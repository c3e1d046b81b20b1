//! # Popup Sign-in Trigger
//!
//! A "Continue with Google" style button as a reducer-driven feature.
//!
//! One activation runs two suspension points in order: the provider popup
//! yields a credential, then the session action exchanges it for an
//! application session. Whatever happens, the trigger returns to idle and the
//! user sees exactly one notice.
//!
//! ## Architecture
//!
//! ```text
//! Activate → Reducer → request_credential → CredentialReceived
//!                    → establish_session  → SessionSettled
//!                    → notify             → AttemptFinished
//! ```
//!
//! The reducer depends only on the [`providers`] traits. Production code plugs
//! in a popup bridge, [`providers::HttpSessionGateway`] and a toast notifier;
//! tests use the scripted [`mocks`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use signin_trigger::*;
//!
//! let env = TriggerEnvironment::new(popup, session, notifier, SystemClock, TriggerConfig::default());
//! let trigger = LoginTrigger::new(env);
//!
//! match trigger.activate_and_wait(Duration::from_secs(120)).await? {
//!     Activation::Finished(Outcome::SignedIn { message }) => println!("{message}"),
//!     Activation::Finished(Outcome::Failed(error)) => println!("{error}"),
//!     Activation::Ignored => {},
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod config;
pub mod constants;
pub mod credential;
pub mod effects;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod providers;
pub mod reducer;
pub mod state;
pub mod trigger;
pub mod view;

// Test utilities
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::TriggerAction;
pub use config::{NoticeMessages, SessionEndpointConfig, TriggerConfig};
pub use credential::{Credential, LoginRequest, ProviderKind, SessionResponse};
pub use environment::TriggerEnvironment;
pub use error::{ActionError, LoginError, ProviderError, Severity};
pub use reducer::LoginTriggerReducer;
pub use state::{Outcome, Phase, TriggerState};
pub use trigger::{Activation, LoginTrigger, TriggerStore};
pub use view::{ButtonView, Indicator};
