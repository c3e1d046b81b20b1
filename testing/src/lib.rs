//! # Sign-in Testing
//!
//! Testing utilities for reducer-driven features.
//!
//! This crate provides:
//! - Mock implementations of core Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Helpers that drive effect descriptions without a Store
//!
//! ## Example
//!
//! ```ignore
//! use signin_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(MyReducer)
//!     .with_env(test_environment())
//!     .given_state(MyState::default())
//!     .when_action(MyAction::Start)
//!     .then_state(|state| assert!(state.started))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use signin_core::environment::Clock;


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Returns the same time until advanced. Clones share the same instant.
    ///
    /// # Example
    ///
    /// ```
    /// use signin_testing::mocks::FixedClock;
    /// use signin_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2);
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Test helpers and utilities
pub mod helpers {
    use signin_core::effect::Effect;

    /// Install a `fmt` subscriber for test output, honouring `RUST_LOG`.
    ///
    /// Safe to call from many tests; only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }

    /// Run effect descriptions to completion without a Store and collect the
    /// actions they produce.
    ///
    /// Futures are awaited one after another in the order given, which keeps
    /// reducer tests deterministic.
    pub async fn run_effects<A: Send + 'static>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A> {
        let mut actions = Vec::new();

        for effect in effects {
            if let Effect::Future(fut) = effect {
                if let Some(action) = fut.await {
                    actions.push(action);
                }
            }
        }

        actions
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, run_effects};
pub use mocks::{FixedClock, test_clock};
