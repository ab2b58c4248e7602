//! Tracing events for each stage of a completion call.
//!
//! ```rust
//! use pobserve::TracingObservabilityHooks;
//! use pprovider::CompletionHooks;
//!
//! fn accepts_hooks(_hooks: &dyn CompletionHooks) {}
//!
//! accepts_hooks(&TracingObservabilityHooks);
//! ```

use std::time::Duration;

use pprovider::{CompletionError, CompletionHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl CompletionHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        tracing::debug!(phase = "completion", event = "attempt_start", operation, attempt);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &CompletionError,
    ) {
        tracing::warn!(
            phase = "completion",
            event = "retry_scheduled",
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = %error.kind,
            status = error.status,
            error = %error
        );
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        tracing::info!(phase = "completion", event = "success", operation, attempts);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &CompletionError) {
        tracing::error!(
            phase = "completion",
            event = "failure",
            operation,
            attempts,
            error_kind = %error.kind,
            status = error.status,
            retryable = error.retryable,
            error = %error
        );
    }
}
