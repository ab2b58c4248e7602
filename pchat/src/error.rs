//! Chat-layer errors and their user-facing presentation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pmemory::MemoryError;
use pprovider::{CompletionError, FailureKind};

pub const RATE_LIMIT_ALERT_TITLE: &str = "Rate Limit Exceeded";
pub const ERROR_ALERT_TITLE: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidInput,
    Completion,
    Store,
}

/// Transcript operation behind a [`ChatErrorKind::Store`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Save,
    Clear,
}

impl StoreAction {
    pub fn alert_message(self) -> &'static str {
        match self {
            Self::Save => "Failed to save chat history. Please try again.",
            Self::Clear => "Failed to clear chat history. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    /// Set when `kind` is [`ChatErrorKind::Completion`].
    pub completion: Option<CompletionError>,
    /// Set when `kind` is [`ChatErrorKind::Store`].
    pub store_action: Option<StoreAction>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            completion: None,
            store_action: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidInput, message)
    }

    pub fn store(action: StoreAction, error: MemoryError) -> Self {
        Self {
            store_action: Some(action),
            ..Self::new(ChatErrorKind::Store, error.to_string())
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.completion.as_ref().map(|error| error.kind)
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self.failure_kind(),
            Some(FailureKind::RateLimit | FailureKind::QuotaExceeded)
        )
    }

    pub fn alert(&self) -> UserAlert {
        match (&self.kind, &self.completion) {
            (ChatErrorKind::Completion, Some(error)) => {
                let title = if self.is_rate_limited() {
                    RATE_LIMIT_ALERT_TITLE
                } else {
                    ERROR_ALERT_TITLE
                };
                let message = match error.kind {
                    FailureKind::ApiError | FailureKind::Unexpected => error.message.clone(),
                    _ => error.guidance().to_string(),
                };
                UserAlert::new(title, message)
            }
            (ChatErrorKind::Store, _) => UserAlert::new(
                ERROR_ALERT_TITLE,
                self.store_action
                    .unwrap_or(StoreAction::Save)
                    .alert_message(),
            ),
            _ => UserAlert::new(ERROR_ALERT_TITLE, self.message.clone()),
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.completion
            .as_ref()
            .map(|error| error as &(dyn Error + 'static))
    }
}

impl From<CompletionError> for ChatError {
    fn from(value: CompletionError) -> Self {
        Self {
            kind: ChatErrorKind::Completion,
            message: value.to_string(),
            completion: Some(value),
            store_action: None,
        }
    }
}

impl From<MemoryError> for ChatError {
    fn from(value: MemoryError) -> Self {
        ChatError::store(StoreAction::Save, value)
    }
}

/// Title and body for a dialog shown after a failed chat action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAlert {
    pub title: String,
    pub message: String,
}

impl UserAlert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pmemory::MemoryError;
    use pprovider::{CompletionError, FailureKind};

    use super::*;

    #[test]
    fn rate_limit_and_quota_share_the_rate_limit_title() {
        let rate_limited = ChatError::from(CompletionError::rate_limit("slow down"));
        let quota = ChatError::from(CompletionError::quota_exceeded("out of credits"));

        assert_eq!(rate_limited.alert().title, RATE_LIMIT_ALERT_TITLE);
        assert_eq!(quota.alert().title, RATE_LIMIT_ALERT_TITLE);
        assert_eq!(
            quota.alert().message,
            FailureKind::QuotaExceeded.guidance()
        );
    }

    #[test]
    fn other_failures_use_generic_title_and_guidance() {
        let error = ChatError::from(CompletionError::network("connection reset"));
        let alert = error.alert();

        assert_eq!(error.kind, ChatErrorKind::Completion);
        assert_eq!(error.failure_kind(), Some(FailureKind::NetworkError));
        assert_eq!(alert.title, ERROR_ALERT_TITLE);
        assert_eq!(alert.message, FailureKind::NetworkError.guidance());
    }

    #[test]
    fn store_and_input_errors_have_no_failure_kind() {
        let store = ChatError::from(MemoryError::storage("disk full"));
        assert_eq!(store.kind, ChatErrorKind::Store);
        assert_eq!(store.failure_kind(), None);
        assert_eq!(store.alert().title, ERROR_ALERT_TITLE);
        assert_eq!(store.store_action, Some(StoreAction::Save));

        let input = ChatError::invalid_input("message must not be empty");
        assert_eq!(input.alert().message, "message must not be empty");
        assert!(!input.is_rate_limited());
    }

    #[test]
    fn api_and_unexpected_failures_show_the_underlying_message() {
        let api = ChatError::from(CompletionError::api_error("model not found").with_status(404));
        let alert = api.alert();
        assert_eq!(alert.title, ERROR_ALERT_TITLE);
        assert!(alert.message.contains("model not found"));

        let generic = ChatError::from(CompletionError::api_error("API error (418)"));
        assert_eq!(generic.alert().message, "API error (418)");

        let unexpected = ChatError::from(CompletionError::unexpected("response body was not UTF-8"));
        assert_eq!(unexpected.alert().message, "response body was not UTF-8");
    }

    #[test]
    fn store_alert_names_the_failed_action() {
        let save = ChatError::store(StoreAction::Save, MemoryError::storage("disk full"));
        let clear = ChatError::store(StoreAction::Clear, MemoryError::storage("read-only"));

        assert_eq!(
            save.alert().message,
            "Failed to save chat history. Please try again."
        );
        assert_eq!(
            clear.alert().message,
            "Failed to clear chat history. Please try again."
        );
        assert_eq!(clear.kind, ChatErrorKind::Store);
    }

    #[test]
    fn completion_error_is_exposed_as_source() {
        let error = ChatError::from(CompletionError::unauthorized("bad key").with_status(401));
        let source = std::error::Error::source(&error).expect("source should be present");
        assert_eq!(source.to_string(), "unauthorized (401): bad key");
    }
}
