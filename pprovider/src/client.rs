//! Resilient chat-completion client over a pluggable transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use pcommon::{BoxFuture, GenerationOptions};
use tokio_util::sync::CancellationToken;

use crate::classify::{
    KeywordQuotaClassifier, RateLimitClassifier, classify_http_failure, extract_reply,
};
use crate::credentials::resolve_credential;
use crate::resilience::{
    CompletionHooks, NoopCompletionHooks, RetryPolicy, Sleeper, TokioSleeper, execute_with_retry,
};
use crate::serde_api::build_api_request;
use crate::{
    ApiCredential, CompletionError, CompletionRequest, CompletionResult, CompletionTransport,
    Turn,
};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const OPERATION: &str = "chat_completion";

/// Settings injected into a [`CompletionClient`] at construction.
///
/// `timeout` bounds each network attempt, not the whole call. With the
/// defaults and no `overall_deadline`, a send that keeps hitting rate limits
/// can take up to `3 × 30s + 2s + 4s`, roughly 96 seconds.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credential: Option<ApiCredential>,
    pub base_url: String,
    pub model: String,
    pub options: GenerationOptions,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub overall_deadline: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credential: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            options: GenerationOptions::default(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            overall_deadline: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.credential = Some(ApiCredential::new(api_key));
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_overall_deadline(mut self, deadline: Duration) -> Self {
        self.overall_deadline = Some(deadline);
        self
    }
}

/// Object-safe seam over anything that can turn a conversation into a reply.
pub trait CompletionService: Send + Sync {
    fn complete<'a>(
        &'a self,
        turns: &'a [Turn],
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, CompletionResult>;
}

#[derive(Clone)]
pub struct CompletionClient {
    config: ClientConfig,
    transport: Arc<dyn CompletionTransport>,
    classifier: Arc<dyn RateLimitClassifier>,
    hooks: Arc<dyn CompletionHooks>,
    sleeper: Arc<dyn Sleeper>,
}

impl CompletionClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn CompletionTransport>) -> Self {
        Self {
            config,
            transport,
            classifier: Arc::new(KeywordQuotaClassifier::default()),
            hooks: Arc::new(NoopCompletionHooks),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Builds a client backed by [`HttpCompletionTransport`](crate::HttpCompletionTransport)
    /// using the configured base URL and per-attempt timeout.
    #[cfg(feature = "http-transport")]
    pub fn from_config(config: ClientConfig) -> Result<Self, CompletionError> {
        let transport = crate::HttpCompletionTransport::with_timeout(config.timeout)?
            .with_base_url(config.base_url.clone());
        Ok(Self::new(config, Arc::new(transport)))
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn RateLimitClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn CompletionHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn send(&self, turns: &[Turn]) -> CompletionResult {
        self.send_with_cancellation(turns, &CancellationToken::new())
            .await
    }

    /// Sends `turns` and resolves to one reply or one classified failure.
    ///
    /// `cancel` is checked before every attempt and every backoff wait, and
    /// interrupts both while they are pending.
    pub async fn send_with_cancellation(
        &self,
        turns: &[Turn],
        cancel: &CancellationToken,
    ) -> CompletionResult {
        let credential = resolve_credential(self.config.credential.as_ref())?;
        let request = CompletionRequest::new(self.config.model.as_str(), turns)
            .with_options(self.config.options);
        let request = &request;
        let started = AtomicU32::new(0);
        let started = &started;

        let run = execute_with_retry(
            OPERATION,
            &self.config.retry,
            self.hooks.as_ref(),
            move |attempt| {
                started.store(attempt, Ordering::Relaxed);
                self.attempt(request, credential, cancel)
            },
            move |delay| self.backoff(delay, cancel),
        );

        let Some(deadline) = self.config.overall_deadline else {
            return run.await;
        };
        match tokio::time::timeout(deadline, run).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let error = CompletionError::network(format!(
                    "no reply within the overall deadline of {}ms",
                    deadline.as_millis()
                ));
                self.hooks
                    .on_failure(OPERATION, started.load(Ordering::Relaxed), &error);
                Err(error)
            }
        }
    }

    async fn attempt(
        &self,
        request: &CompletionRequest,
        credential: &ApiCredential,
        cancel: &CancellationToken,
    ) -> CompletionResult {
        if cancel.is_cancelled() {
            return Err(CompletionError::cancelled("request cancelled before dispatch"));
        }

        let api_request = build_api_request(request)?;
        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(CompletionError::cancelled(
                    "request cancelled while awaiting a response",
                ));
            }
            reply = self.transport.post_chat(&api_request, credential) => reply?,
        };

        if reply.status.is_success() {
            extract_reply(&reply.body)
        } else {
            Err(classify_http_failure(
                reply.status,
                &reply.body,
                self.classifier.as_ref(),
            ))
        }
    }

    async fn backoff(
        &self,
        delay: Duration,
        cancel: &CancellationToken,
    ) -> Result<(), CompletionError> {
        if cancel.is_cancelled() {
            return Err(CompletionError::cancelled("request cancelled before retry"));
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CompletionError::cancelled(
                "request cancelled during retry backoff",
            )),
            _ = self.sleeper.sleep(delay) => Ok(()),
        }
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl CompletionService for CompletionClient {
    fn complete<'a>(
        &'a self,
        turns: &'a [Turn],
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, CompletionResult> {
        Box::pin(self.send_with_cancellation(turns, cancel))
    }
}
