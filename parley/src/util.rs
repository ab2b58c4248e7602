//! Small convenience constructors for common types.

use crate::{Role, TranscriptKey, Turn};

pub fn user_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::User, content)
}

pub fn assistant_turn(content: impl Into<String>) -> Turn {
    Turn::new(Role::Assistant, content)
}

pub fn transcript_key(value: impl Into<String>) -> TranscriptKey {
    TranscriptKey::new(value)
}

pub fn parse_role(value: &str) -> Option<Role> {
    match value.trim().to_ascii_lowercase().as_str() {
        "user" | "human" => Some(Role::User),
        "assistant" | "ai" | "bot" => Some(Role::Assistant),
        _ => None,
    }
}
