//! Chat-completion HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use crate::{CompletionError, CompletionRequest};

pub fn build_api_request(request: &CompletionRequest) -> Result<ChatApiRequest, CompletionError> {
    request.validate()?;

    Ok(ChatApiRequest {
        model: request.model.clone(),
        messages: request
            .turns()
            .iter()
            .map(|turn| ChatApiMessage {
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
            })
            .collect(),
        temperature: request.temperature(),
        max_tokens: request.max_output_tokens(),
    })
}

/// Parses `{ "error": { "message", "type"?, "code"? } }`. Anything else is `None`.
pub fn parse_error_body(body: &str) -> Option<ChatApiError> {
    serde_json::from_str::<ChatApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatApiRequest {
    pub model: String,
    pub messages: Vec<ChatApiMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatApiMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatApiResponse {
    #[serde(default)]
    pub choices: Vec<ChatApiChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatApiChoice {
    pub message: Option<ChatApiAssistantMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatApiAssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatApiErrorEnvelope {
    error: ChatApiError,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatApiError {
    pub message: String,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureKind, Turn};

    #[test]
    fn build_api_request_preserves_turn_order_and_settings() {
        let turns = vec![
            Turn::user("one"),
            Turn::assistant("two"),
            Turn::user("three"),
        ];
        let request = CompletionRequest::new("llama-3.1-8b-instant", &turns);
        let api = build_api_request(&request).expect("request should build");

        let encoded = serde_json::to_string(&api).expect("request should serialize");
        let body: serde_json::Value = serde_json::from_str(&encoded).expect("body should parse");
        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    {"role": "user", "content": "one"},
                    {"role": "assistant", "content": "two"},
                    {"role": "user", "content": "three"}
                ],
                "temperature": 0.7,
                "max_tokens": 1024
            })
        );
    }

    #[test]
    fn build_api_request_rejects_empty_conversation() {
        let request = CompletionRequest::new("model", &[]);
        let error = build_api_request(&request).expect_err("should fail");
        assert_eq!(error.kind, FailureKind::Unexpected);
    }

    #[test]
    fn parse_error_body_handles_optional_fields_and_garbage() {
        let full = parse_error_body(
            r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"quota"}}"#,
        )
        .expect("body should parse");
        assert_eq!(full.error_type.as_deref(), Some("insufficient_quota"));
        assert_eq!(full.code.as_deref(), Some("quota"));

        let minimal = parse_error_body(r#"{"error":{"message":"slow down"}}"#)
            .expect("body should parse");
        assert_eq!(minimal.message, "slow down");
        assert_eq!(minimal.error_type, None);

        assert!(parse_error_body("<html>bad gateway</html>").is_none());
        assert!(parse_error_body(r#"{"error":"flat string"}"#).is_none());
        assert!(parse_error_body("").is_none());
    }
}
