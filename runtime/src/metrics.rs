//! Prometheus metrics for the Store runtime.
//!
//! The Store records counters and histograms through the `metrics` facade.
//! Nothing is exported until a recorder is installed; binaries that want a
//! Prometheus text dump install one with [`MetricsRecorder::install`].
//!
//! # Example
//!
//! ```rust,no_run
//! use signin_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = MetricsRecorder::install()?;
//! // ... run the store ...
//! if let Some(text) = recorder.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

// Re-export metrics macros for use in other crates
pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Installed Prometheus recorder.
///
/// Holds the render handle when this instance performed the installation.
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Install the global Prometheus recorder and register store metric descriptions.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g., in tests), the returned
    /// recorder has no handle and [`MetricsRecorder::render`] yields `None`.
    pub fn install() -> Result<Self, MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[
                    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
                    60.0,
                ],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                register_metrics();
                tracing::info!("Prometheus metrics recorder installed");
                Ok(Self {
                    handle: Some(handle),
                })
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(Self { handle: None })
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Get the metrics handle for rendering.
    #[must_use]
    pub const fn handle(&self) -> Option<&PrometheusHandle> {
        self.handle.as_ref()
    }

    /// Render current metrics in Prometheus format.
    ///
    /// Returns `None` if this instance did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register store metric descriptions.
pub fn register_metrics() {
    describe_counter!(
        "store_actions_total",
        "Total number of actions processed by the store"
    );
    describe_counter!(
        "store_actions_rejected_total",
        "Actions rejected because the store was shutting down"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time taken to run the reducer for one action"
    );
    describe_counter!(
        "store_effects_executed_total",
        "Total number of effects executed, labelled by type"
    );
    describe_counter!(
        "store_effects_panicked_total",
        "Effects whose task panicked before producing an action"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one reducer pass.
    pub fn record_action(duration: Duration, effect_count: usize) {
        counter!("store_actions_total").increment(1);
        histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
        // Precision loss acceptable for metrics
        #[allow(clippy::cast_precision_loss)]
        histogram!("store_effects_per_action").record(effect_count as f64);
    }

    /// Record an action rejected during shutdown.
    pub fn record_rejected() {
        counter!("store_actions_rejected_total").increment(1);
    }

    /// Record the execution of an effect.
    pub fn record_effect(kind: &'static str) {
        counter!("store_effects_executed_total", "type" => kind).increment(1);
    }

    /// Record an effect task that panicked.
    pub fn record_effect_panic() {
        counter!("store_effects_panicked_total").increment(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_a_noop() {
        StoreMetrics::record_action(Duration::from_millis(1), 2);
        StoreMetrics::record_effect("future");
        StoreMetrics::record_rejected();
    }

    #[test]
    fn install_and_render() {
        let recorder = MetricsRecorder::install().unwrap();

        StoreMetrics::record_action(Duration::from_millis(5), 1);
        StoreMetrics::record_effect("future");

        // Another test binary in the same process may have installed first.
        if let Some(rendered) = recorder.render() {
            assert!(rendered.contains("store_actions_total"));
            assert!(rendered.contains("store_effects_executed_total"));
        }
    }
}
