//! Conversation turns, completion requests, and the assistant reply value.
//!
//! ```rust
//! use pprovider::{AssistantReply, CompletionRequest, Role, Turn};
//!
//! let turns = vec![Turn::user("hi"), Turn::assistant("hello"), Turn::user("how are you?")];
//! let request = CompletionRequest::new("llama-3.1-8b-instant", &turns);
//! assert_eq!(request.turns().len(), 3);
//! assert_eq!(request.turns()[1].role, Role::Assistant);
//!
//! assert!(AssistantReply::new("   ").is_none());
//! assert_eq!(AssistantReply::new(" fine ").expect("non-empty").text(), "fine");
//! ```

use std::fmt::{Display, Formatter};

use pcommon::GenerationOptions;
use serde::{Deserialize, Serialize};

use crate::CompletionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of a conversation, tagged with its speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Request for a single completion. The turn snapshot is owned and cannot be
/// changed once the request exists.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    turns: Vec<Turn>,
    pub model: String,
    pub options: GenerationOptions,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, turns: &[Turn]) -> Self {
        Self {
            turns: turns.to_vec(),
            model: model.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn temperature(&self) -> f32 {
        self.options.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.options.max_output_tokens
    }

    pub fn validate(&self) -> Result<(), CompletionError> {
        if self.model.trim().is_empty() {
            return Err(CompletionError::unexpected("model must not be empty"));
        }

        if self.turns.is_empty() {
            return Err(CompletionError::unexpected(
                "at least one turn is required",
            ));
        }

        self.options.validate().map_err(CompletionError::unexpected)
    }
}

/// Assistant text that is guaranteed to be non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    text: String,
}

impl AssistantReply {
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self {
            text: trimmed.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn into_turn(self) -> Turn {
        Turn::assistant(self.text)
    }
}

impl Display for AssistantReply {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

pub type CompletionResult = Result<AssistantReply, CompletionError>;

#[cfg(test)]
mod tests {
    use pcommon::GenerationOptions;

    use super::*;
    use crate::FailureKind;

    #[test]
    fn request_snapshot_is_independent_of_caller_vector() {
        let mut turns = vec![Turn::user("first")];
        let request = CompletionRequest::new("model", &turns);
        turns.push(Turn::assistant("second"));

        assert_eq!(request.turns(), &[Turn::user("first")]);
    }

    #[test]
    fn request_validation_reports_unexpected_failures() {
        let empty = CompletionRequest::new("model", &[]);
        let error = empty.validate().expect_err("empty turns should fail");
        assert_eq!(error.kind, FailureKind::Unexpected);

        let blank_model = CompletionRequest::new("  ", &[Turn::user("hi")]);
        assert!(blank_model.validate().is_err());

        let hot = CompletionRequest::new("model", &[Turn::user("hi")])
            .with_options(GenerationOptions::default().with_temperature(3.0));
        assert!(hot.validate().is_err());

        let ok = CompletionRequest::new("model", &[Turn::user("hi")]);
        assert!(ok.validate().is_ok());
        assert_eq!(ok.temperature(), 0.7);
        assert_eq!(ok.max_output_tokens(), 1024);
    }

    #[test]
    fn assistant_reply_rejects_whitespace_and_trims() {
        assert!(AssistantReply::new("").is_none());
        assert!(AssistantReply::new(" \n\t ").is_none());

        let reply = AssistantReply::new("\n Hello \n").expect("reply should exist");
        assert_eq!(reply.text(), "Hello");
        assert_eq!(reply.into_turn(), Turn::assistant("Hello"));
    }

    #[test]
    fn role_serializes_to_wire_names() {
        let json = serde_json::to_string(&Turn::user("hi")).expect("turn should serialize");
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
