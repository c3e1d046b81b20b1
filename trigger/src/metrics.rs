//! Sign-in attempt metrics.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Register sign-in metric descriptions.
pub fn register_metrics() {
    describe_counter!("signin_attempts_total", "Sign-in attempts started");
    describe_counter!(
        "signin_activations_ignored_total",
        "Activations dropped because the trigger was disabled"
    );
    describe_counter!(
        "signin_outcomes_total",
        "Finished sign-in attempts, labelled by outcome"
    );
    describe_histogram!(
        "signin_attempt_duration_seconds",
        "Time from activation to the terminal result"
    );
}

/// Sign-in metrics recorder.
pub struct SignInMetrics;

impl SignInMetrics {
    /// Record a started attempt.
    pub fn record_attempt() {
        counter!("signin_attempts_total").increment(1);
    }

    /// Record an ignored activation.
    pub fn record_ignored() {
        counter!("signin_activations_ignored_total").increment(1);
    }

    /// Record a finished attempt.
    pub fn record_outcome(outcome: &'static str, duration: Option<Duration>) {
        counter!("signin_outcomes_total", "outcome" => outcome).increment(1);
        if let Some(duration) = duration {
            histogram!("signin_attempt_duration_seconds").record(duration.as_secs_f64());
        }
    }
}
