//! Chat sessions that keep a persisted transcript in step with completions.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pchat::{ChatErrorKind, ChatSession};
//! use pmemory::InMemoryTranscriptStore;
//! use pprovider::{ClientConfig, CompletionClient, CompletionTransport};
//!
//! # #[derive(Debug)]
//! # struct Offline;
//! # impl CompletionTransport for Offline {
//! #     fn post_chat<'a>(
//! #         &'a self,
//! #         _request: &'a pprovider::ChatApiRequest,
//! #         _credential: &'a pprovider::ApiCredential,
//! #     ) -> pcommon::BoxFuture<'a, Result<pprovider::HttpReply, pprovider::CompletionError>> {
//! #         Box::pin(async { Err(pprovider::CompletionError::network("offline")) })
//! #     }
//! # }
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .expect("runtime should build");
//!
//! runtime.block_on(async {
//!     let client = CompletionClient::new(ClientConfig::default(), Arc::new(Offline));
//!     let mut session =
//!         ChatSession::open(Arc::new(client), Arc::new(InMemoryTranscriptStore::new())).await;
//!
//!     let error = session.send("   ").await.expect_err("blank input is rejected");
//!     assert_eq!(error.kind, ChatErrorKind::InvalidInput);
//!     assert!(session.is_empty());
//! });
//! ```

mod error;
mod session;

pub mod prelude {
    pub use crate::{ChatError, ChatErrorKind, ChatSession, StoreAction, UserAlert};
    pub use pcommon::TranscriptKey;
}

pub use error::{
    ChatError, ChatErrorKind, ERROR_ALERT_TITLE, RATE_LIMIT_ALERT_TITLE, StoreAction, UserAlert,
};
pub use pcommon::TranscriptKey;
pub use session::ChatSession;
