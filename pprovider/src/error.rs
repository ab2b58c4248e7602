//! Completion failure kinds and error value helpers.
//!
//! ```rust
//! use pprovider::{CompletionError, FailureKind};
//!
//! let auth = CompletionError::unauthorized("bad key");
//! assert!(!auth.retryable);
//!
//! let limited = CompletionError::rate_limit("slow down");
//! assert!(limited.retryable);
//! assert_eq!(limited.kind, FailureKind::RateLimit);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Configuration,
    Unauthorized,
    RateLimit,
    QuotaExceeded,
    PaymentRequired,
    ServiceUnavailable,
    ApiError,
    NetworkError,
    EmptyResponse,
    Unexpected,
    Cancelled,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Unauthorized => "unauthorized",
            Self::RateLimit => "rate_limit",
            Self::QuotaExceeded => "quota_exceeded",
            Self::PaymentRequired => "payment_required",
            Self::ServiceUnavailable => "service_unavailable",
            Self::ApiError => "api_error",
            Self::NetworkError => "network_error",
            Self::EmptyResponse => "empty_response",
            Self::Unexpected => "unexpected",
            Self::Cancelled => "cancelled",
        }
    }

    /// What the end user should do about a failure of this kind.
    pub fn guidance(self) -> &'static str {
        match self {
            Self::Configuration => {
                "API key not configured. Set an API key for the completion service and try again."
            }
            Self::Unauthorized => "Invalid API key. Please check the configured API key.",
            Self::RateLimit => "Rate limit exceeded. Please wait a moment and try again.",
            Self::QuotaExceeded => {
                "Usage quota exhausted. Please check the billing settings of your account."
            }
            Self::PaymentRequired => "Payment required. Please check your account and billing.",
            Self::ServiceUnavailable => "AI service error. Please try again in a few moments.",
            Self::ApiError => "The completion service rejected the request. Please try again.",
            Self::NetworkError => "Network error. Please check your internet connection.",
            Self::EmptyResponse => "No response from AI service. Please try again.",
            Self::Unexpected => "An unexpected error occurred.",
            Self::Cancelled => "The request was cancelled.",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionError {
    pub kind: FailureKind,
    pub message: String,
    pub status: Option<u16>,
    pub retryable: bool,
}

impl CompletionError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retryable: kind == FailureKind::RateLimit,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Configuration, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unauthorized, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(FailureKind::RateLimit, message)
    }

    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::new(FailureKind::QuotaExceeded, message)
    }

    pub fn payment_required(message: impl Into<String>) -> Self {
        Self::new(FailureKind::PaymentRequired, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ServiceUnavailable, message)
    }

    pub fn api_error(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ApiError, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NetworkError, message)
    }

    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::new(FailureKind::EmptyResponse, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Unexpected, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Cancelled, message)
    }

    pub fn guidance(&self) -> &'static str {
        self.kind.guidance()
    }
}

impl Display for CompletionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({status}): {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl Error for CompletionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rate_limit_is_retryable() {
        assert!(CompletionError::rate_limit("429").retryable);
        assert!(!CompletionError::quota_exceeded("quota").retryable);
        assert!(!CompletionError::service_unavailable("503").retryable);
        assert!(!CompletionError::network("offline").retryable);
    }

    #[test]
    fn display_includes_status_when_known() {
        let error = CompletionError::api_error("bad model").with_status(404);
        assert_eq!(error.to_string(), "api_error (404): bad model");
        assert_eq!(
            CompletionError::network("offline").to_string(),
            "network_error: offline"
        );
    }
}
