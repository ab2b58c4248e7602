use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use pprovider::{CompletionError, CompletionHooks};

/// Runs the inner hooks, discarding any panic they raise.
pub struct SafeCompletionHooks<H> {
    inner: H,
}

impl<H> SafeCompletionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> CompletionHooks for SafeCompletionHooks<H>
where
    H: CompletionHooks,
{
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(operation, attempt)
        }));
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &CompletionError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_retry_scheduled(operation, attempt, delay, error)
        }));
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(operation, attempts)
        }));
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &CompletionError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(operation, attempts, error)
        }));
    }
}

/// Forwards every callback to `first`, then `second`.
pub struct CombinedCompletionHooks<A, B> {
    first: A,
    second: B,
}

impl<A, B> CombinedCompletionHooks<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> CompletionHooks for CombinedCompletionHooks<A, B>
where
    A: CompletionHooks,
    B: CompletionHooks,
{
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        self.first.on_attempt_start(operation, attempt);
        self.second.on_attempt_start(operation, attempt);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &CompletionError,
    ) {
        self.first
            .on_retry_scheduled(operation, attempt, delay, error);
        self.second
            .on_retry_scheduled(operation, attempt, delay, error);
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        self.first.on_success(operation, attempts);
        self.second.on_success(operation, attempts);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &CompletionError) {
        self.first.on_failure(operation, attempts, error);
        self.second.on_failure(operation, attempts, error);
    }
}
