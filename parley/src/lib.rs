//! Unified facade over the parley workspace crates.
//!
//! This crate is meant to be the single dependency for most applications.
//! It re-exports the completion client, transcript stores, and chat sessions,
//! and adds environment-driven configuration plus wiring helpers.
//!
//! ```rust,no_run
//! use parley::{ParleyConfig, open_chat_session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ParleyConfig::from_env()?;
//! let mut session = open_chat_session(&config).await?;
//!
//! match session.send("Tell me a joke").await {
//!     Ok(reply) => println!("{reply}"),
//!     Err(error) => {
//!         let alert = error.alert();
//!         eprintln!("{}: {}", alert.title, alert.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use pchat;
pub use pcommon;
pub use pmemory;
pub use pobserve;
pub use pprovider;

pub use pchat::{ChatError, ChatErrorKind, ChatSession, UserAlert};
pub use pcommon::{BoxFuture, GenerationOptions, TranscriptKey};
pub use pmemory::{
    FilesystemTranscriptStore, InMemoryTranscriptStore, MemoryError, MemoryErrorKind,
    SqliteTranscriptStore, StoredTranscript, TranscriptStore, TranscriptStoreConfig,
    create_transcript_store,
};
pub use pobserve::{
    CombinedCompletionHooks, MetricsObservabilityHooks, SafeCompletionHooks,
    TracingObservabilityHooks,
};
pub use pprovider::{
    ApiCredential, AssistantReply, CancellationToken, ClientConfig, CompletionClient,
    CompletionError, CompletionHooks, CompletionResult, CompletionService, CompletionTransport,
    FailureKind, RetryPolicy, Role, Turn,
};

pub use config::{
    ENV_API_KEY, ENV_BASE_URL, ENV_MODEL, ENV_STORE_BACKEND, ENV_STORE_PATH, ENV_TIMEOUT_SECS,
    ENV_TRANSCRIPT_KEY, ParleyConfig, parse_store_backend,
};
pub use error::{ParleyError, ParleyErrorKind};
#[cfg(feature = "http-transport")]
pub use runtime::{build_client, open_chat_session};
pub use runtime::{build_store, default_hooks, in_memory_store, open_chat_session_with};
pub use util::{assistant_turn, parse_role, transcript_key, user_turn};

#[cfg(test)]
mod tests {
    use crate::Role;

    #[test]
    fn turn_macro_creates_expected_turn() {
        let turn = crate::turn!(user => "hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "hello");
    }

    #[test]
    fn turns_macro_builds_ordered_history() {
        let history = crate::turns![
            user => "hi",
            assistant => "hello",
            user => "how are you?",
        ];

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[2].content, "how are you?");
        assert!(crate::turns![].is_empty());
    }
}
