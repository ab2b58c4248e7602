//! Counters and histograms for completion calls.
//!
//! Without an installed `metrics` recorder every call is a no-op.

use std::time::Duration;

use pprovider::{CompletionError, CompletionHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl CompletionHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, _attempt: u32) {
        metrics::counter!(
            "parley_completion_attempt_start_total",
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &CompletionError,
    ) {
        metrics::counter!(
            "parley_completion_retry_scheduled_total",
            "operation" => operation.to_string(),
            "error_kind" => error.kind.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "parley_completion_retry_delay_seconds",
            "operation" => operation.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        metrics::counter!(
            "parley_completion_success_total",
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "parley_completion_attempts_per_success",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &CompletionError) {
        metrics::counter!(
            "parley_completion_failure_total",
            "operation" => operation.to_string(),
            "error_kind" => error.kind.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "parley_completion_attempts_per_failure",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}
