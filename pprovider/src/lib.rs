//! Resilient client for OpenAI-compatible chat-completion endpoints.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pprovider::{
//!     ApiCredential, BoxFuture, ChatApiRequest, ClientConfig, CompletionClient, CompletionError,
//!     CompletionTransport, FailureKind, HttpReply, Turn,
//! };
//!
//! #[derive(Debug)]
//! struct Offline;
//!
//! impl CompletionTransport for Offline {
//!     fn post_chat<'a>(
//!         &'a self,
//!         _request: &'a ChatApiRequest,
//!         _credential: &'a ApiCredential,
//!     ) -> BoxFuture<'a, Result<HttpReply, CompletionError>> {
//!         Box::pin(async { Err(CompletionError::network("offline")) })
//!     }
//! }
//!
//! let client = CompletionClient::new(ClientConfig::default(), Arc::new(Offline));
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .expect("runtime should build");
//! let error = runtime
//!     .block_on(client.send(&[Turn::user("hi")]))
//!     .expect_err("no credential is configured");
//! assert_eq!(error.kind, FailureKind::Configuration);
//! ```

mod classify;
mod client;
mod credentials;
mod error;
#[cfg(feature = "http-transport")]
mod http_transport;
mod model;
mod resilience;
mod serde_api;
mod transport;

pub mod prelude {
    pub use crate::{
        ApiCredential, AssistantReply, ClientConfig, CompletionClient, CompletionError,
        CompletionHooks, CompletionResult, CompletionService, FailureKind, RetryPolicy, Role,
        Turn,
    };
    pub use tokio_util::sync::CancellationToken;
}

pub use classify::{
    KeywordQuotaClassifier, RateLimitClassifier, RateLimitKind, classify_http_failure,
    extract_reply,
};
pub use client::{
    ClientConfig, CompletionClient, CompletionService, DEFAULT_BASE_URL, DEFAULT_MODEL,
    DEFAULT_TIMEOUT,
};
pub use credentials::{ApiCredential, PLACEHOLDER_API_KEYS, SecretString};
pub use error::{CompletionError, FailureKind};
#[cfg(feature = "http-transport")]
pub use http_transport::HttpCompletionTransport;
pub use model::{AssistantReply, CompletionRequest, CompletionResult, Role, Turn};
pub use pcommon::{BoxFuture, GenerationOptions};
pub use resilience::{
    CompletionHooks, NoopCompletionHooks, RetryPolicy, RetryState, Sleeper, TokioSleeper,
    execute_with_retry,
};
pub use serde_api::{
    ChatApiError, ChatApiMessage, ChatApiRequest, build_api_request, parse_error_body,
};
pub use transport::{CompletionTransport, HttpReply};
pub use tokio_util::sync::CancellationToken;
