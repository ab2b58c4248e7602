//! Mapping of HTTP outcomes onto [`FailureKind`](crate::FailureKind).
//!
//! Quota detection reads the provider's free-text error message. That wording
//! is owned upstream and can change without notice, so the check lives behind
//! [`RateLimitClassifier`] and can be swapped without touching the retry loop.

use http::StatusCode;

use crate::serde_api::{ChatApiError, ChatApiResponse, parse_error_body};
use crate::{AssistantReply, CompletionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitKind {
    /// Short-lived throttling; worth retrying.
    Transient,
    /// Usage or billing limit; needs an account action.
    QuotaExhausted,
}

pub trait RateLimitClassifier: Send + Sync {
    /// `error` is `None` when the 429 body was missing or not in the expected shape.
    fn classify(&self, error: Option<&ChatApiError>) -> RateLimitKind;
}

/// Case-insensitive keyword match on the error message.
#[derive(Debug, Clone)]
pub struct KeywordQuotaClassifier {
    keywords: Vec<String>,
}

impl Default for KeywordQuotaClassifier {
    fn default() -> Self {
        Self::new(["quota", "billing"])
    }
}

impl KeywordQuotaClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl RateLimitClassifier for KeywordQuotaClassifier {
    fn classify(&self, error: Option<&ChatApiError>) -> RateLimitKind {
        let Some(error) = error else {
            return RateLimitKind::Transient;
        };

        let message = error.message.to_lowercase();
        if self
            .keywords
            .iter()
            .any(|keyword| message.contains(keyword.as_str()))
        {
            RateLimitKind::QuotaExhausted
        } else {
            RateLimitKind::Transient
        }
    }
}

/// Classifies a non-success HTTP response.
///
/// A 429 classified as transient comes back as a retryable `RateLimit`; the
/// retry loop decides whether another attempt is allowed.
pub fn classify_http_failure(
    status: StatusCode,
    body: &str,
    classifier: &dyn RateLimitClassifier,
) -> CompletionError {
    let api_error = parse_error_body(body);
    let code = status.as_u16();

    let error = match status {
        StatusCode::UNAUTHORIZED => CompletionError::unauthorized(
            api_error
                .map(|error| error.message)
                .unwrap_or_else(|| "invalid API key".to_string()),
        ),
        StatusCode::PAYMENT_REQUIRED => CompletionError::payment_required(
            api_error
                .map(|error| error.message)
                .unwrap_or_else(|| "payment required".to_string()),
        ),
        StatusCode::TOO_MANY_REQUESTS => match classifier.classify(api_error.as_ref()) {
            RateLimitKind::QuotaExhausted => CompletionError::quota_exceeded(
                api_error
                    .map(|error| error.message)
                    .unwrap_or_else(|| "quota exceeded".to_string()),
            ),
            RateLimitKind::Transient => CompletionError::rate_limit(
                api_error
                    .map(|error| error.message)
                    .unwrap_or_else(|| "rate limit exceeded".to_string()),
            ),
        },
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE => CompletionError::service_unavailable(
            api_error
                .map(|error| error.message)
                .unwrap_or_else(|| format!("service unavailable ({code})")),
        ),
        _ => CompletionError::api_error(
            api_error
                .map(|error| error.message)
                .unwrap_or_else(|| format!("API error ({code})")),
        ),
    };

    error.with_status(code)
}

/// Extracts the first choice's content from a success body.
pub fn extract_reply(body: &str) -> Result<AssistantReply, CompletionError> {
    let parsed = serde_json::from_str::<ChatApiResponse>(body).map_err(|err| {
        CompletionError::empty_response(format!("response body could not be parsed: {err}"))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .and_then(AssistantReply::new)
        .ok_or_else(|| CompletionError::empty_response("no response from AI service"))
}
