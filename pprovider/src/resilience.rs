//! Retry/backoff policy, per-call retry state, and operational hook contracts.

use std::future::Future;
use std::time::Duration;

use pcommon::BoxFuture;

use crate::CompletionError;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(2000),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn state(&self) -> RetryState {
        RetryState::new(self.max_retries)
    }

    /// Delay before retry `retry` (0-indexed): `base_delay * multiplier^retry`.
    pub fn backoff_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.min(i32::MAX as u32) as i32;
        let unbounded = self.base_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()))
    }
}

/// Retry bookkeeping for one logical send. Never shared between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempt: u32,
    max_retries: u32,
}

impl RetryState {
    pub fn new(max_retries: u32) -> Self {
        Self {
            attempt: 0,
            max_retries,
        }
    }

    /// Retries already performed.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Network attempts made so far, counting the one in progress.
    pub fn attempts_made(&self) -> u32 {
        self.attempt + 1
    }

    pub fn can_retry(&self) -> bool {
        self.attempt < self.max_retries
    }

    pub fn should_retry(&self, error: &CompletionError) -> bool {
        error.retryable && self.can_retry()
    }

    pub fn advance(&mut self) {
        self.attempt += 1;
    }
}

pub trait CompletionHooks: Send + Sync {
    fn on_attempt_start(&self, _operation: &str, _attempt: u32) {}

    fn on_retry_scheduled(
        &self,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &CompletionError,
    ) {
    }

    fn on_success(&self, _operation: &str, _attempts: u32) {}

    fn on_failure(&self, _operation: &str, _attempts: u32, _error: &CompletionError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCompletionHooks;

impl CompletionHooks for NoopCompletionHooks {}

/// Clock seam for backoff waits.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, delay: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(delay))
    }
}

/// Runs `execute` until it succeeds, fails terminally, or the retry budget is
/// spent. `execute` receives the 1-based attempt number. A failing `sleep`
/// (for example a cancelled wait) ends the loop with that error.
pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn CompletionHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, CompletionError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, CompletionError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = Result<(), CompletionError>>,
{
    let mut state = policy.state();

    loop {
        let attempt = state.attempts_made();
        hooks.on_attempt_start(operation, attempt);

        let error = match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(operation, attempt);
                return Ok(value);
            }
            Err(error) => error,
        };

        if !state.should_retry(&error) {
            hooks.on_failure(operation, attempt, &error);
            return Err(error);
        }

        let delay = policy.backoff_for_retry(state.attempt());
        hooks.on_retry_scheduled(operation, attempt, delay, &error);
        if let Err(interrupted) = sleep(delay).await {
            hooks.on_failure(operation, attempt, &interrupted);
            return Err(interrupted);
        }
        state.advance();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::FailureKind;

    #[test]
    fn retry_state_terminates_at_max_retries() {
        let mut state = RetryPolicy::default().state();
        let limited = CompletionError::rate_limit("429");
        let terminal = CompletionError::quota_exceeded("quota");

        assert!(state.should_retry(&limited));
        assert!(!state.should_retry(&terminal));
        state.advance();
        assert!(state.should_retry(&limited));
        state.advance();
        assert_eq!(state.attempt(), 2);
        assert_eq!(state.attempts_made(), 3);
        assert!(!state.can_retry());
        assert!(!state.should_retry(&limited));
    }

    #[test]
    fn default_backoff_doubles_from_two_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.backoff_for_retry(0), Duration::from_millis(2000));
        assert_eq!(policy.backoff_for_retry(1), Duration::from_millis(4000));
        assert_eq!(policy.backoff_for_retry(2), Duration::from_millis(8000));
    }

    #[test]
    fn backoff_is_capped_by_max_backoff() {
        let policy = RetryPolicy::new(5)
            .with_base_delay(Duration::from_millis(100))
            .with_max_backoff(Duration::from_millis(250));

        assert_eq!(policy.backoff_for_retry(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_for_retry(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_for_retry(2), Duration::from_millis(250));
        assert_eq!(policy.backoff_for_retry(40), Duration::from_millis(250));
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl CompletionHooks for RecordingHooks {
        fn on_attempt_start(&self, operation: &str, attempt: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{operation}:{attempt}"));
        }

        fn on_retry_scheduled(
            &self,
            operation: &str,
            attempt: u32,
            delay: Duration,
            _error: &CompletionError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("retry:{operation}:{attempt}:{}", delay.as_millis()));
        }

        fn on_success(&self, operation: &str, attempts: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{operation}:{attempts}"));
        }

        fn on_failure(&self, operation: &str, attempts: u32, error: &CompletionError) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{operation}:{attempts}:{}", error.kind));
        }
    }

    #[tokio::test]
    async fn execute_with_retry_retries_rate_limits_then_succeeds() {
        let policy = RetryPolicy::default();
        let hooks = RecordingHooks::default();
        let attempts = Arc::new(Mutex::new(0_u32));
        let sleeps = Arc::new(Mutex::new(Vec::new()));

        let result = execute_with_retry(
            "chat_completion",
            &policy,
            &hooks,
            {
                let attempts = Arc::clone(&attempts);
                move |attempt| {
                    let attempts = Arc::clone(&attempts);
                    async move {
                        *attempts.lock().expect("attempts lock") = attempt;
                        if attempt < 3 {
                            Err(CompletionError::rate_limit("slow down"))
                        } else {
                            Ok("ok")
                        }
                    }
                }
            },
            {
                let sleeps = Arc::clone(&sleeps);
                move |delay| {
                    let sleeps = Arc::clone(&sleeps);
                    async move {
                        sleeps.lock().expect("sleep lock").push(delay);
                        Ok(())
                    }
                }
            },
        )
        .await;

        assert_eq!(result.expect("result should succeed"), "ok");
        assert_eq!(*attempts.lock().expect("attempts lock"), 3);
        assert_eq!(
            *sleeps.lock().expect("sleep lock"),
            vec![Duration::from_millis(2000), Duration::from_millis(4000)]
        );

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec![
                "start:chat_completion:1",
                "retry:chat_completion:1:2000",
                "start:chat_completion:2",
                "retry:chat_completion:2:4000",
                "start:chat_completion:3",
                "success:chat_completion:3",
            ]
        );
    }

    #[tokio::test]
    async fn execute_with_retry_stops_on_non_retryable_error() {
        let policy = RetryPolicy::new(5);
        let hooks = RecordingHooks::default();

        let result = execute_with_retry::<(), _, _, _, _>(
            "chat_completion",
            &policy,
            &hooks,
            |_| async move { Err(CompletionError::unauthorized("bad key")) },
            |_| async move { Ok(()) },
        )
        .await;

        let error = result.expect_err("result should fail");
        assert_eq!(error.kind, FailureKind::Unauthorized);
        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec!["start:chat_completion:1", "failure:chat_completion:1:unauthorized"]
        );
    }

    #[tokio::test]
    async fn execute_with_retry_returns_sleep_interruption() {
        let policy = RetryPolicy::default();
        let hooks = NoopCompletionHooks;
        let calls = Arc::new(Mutex::new(0_u32));

        let result = execute_with_retry::<(), _, _, _, _>(
            "chat_completion",
            &policy,
            &hooks,
            {
                let calls = Arc::clone(&calls);
                move |_| {
                    let calls = Arc::clone(&calls);
                    async move {
                        *calls.lock().expect("calls lock") += 1;
                        Err(CompletionError::rate_limit("slow down"))
                    }
                }
            },
            |_| async move { Err(CompletionError::cancelled("caller went away")) },
        )
        .await;

        assert_eq!(
            result.expect_err("should be cancelled").kind,
            FailureKind::Cancelled
        );
        assert_eq!(*calls.lock().expect("calls lock"), 1);
    }
}
