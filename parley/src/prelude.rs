//! Common imports for most parley applications.

pub use crate::{
    assistant_turn, build_store, default_hooks, in_memory_store, open_chat_session_with,
    parse_role, transcript_key, user_turn,
};
#[cfg(feature = "http-transport")]
pub use crate::{build_client, open_chat_session};
pub use crate::{turn, turns};
pub use crate::{
    AssistantReply, CancellationToken, ChatError, ChatErrorKind, ChatSession, ClientConfig,
    CompletionClient, CompletionError, CompletionService, FailureKind, ParleyConfig, ParleyError,
    RetryPolicy, Role, TranscriptKey, TranscriptStore, TranscriptStoreConfig, Turn, UserAlert,
};
