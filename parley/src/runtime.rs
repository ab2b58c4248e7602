//! Wiring helpers that turn a [`ParleyConfig`] into a ready chat session.

use std::sync::Arc;

use pchat::ChatSession;
use pmemory::{InMemoryTranscriptStore, TranscriptStore, create_transcript_store};
use pobserve::{
    CombinedCompletionHooks, MetricsObservabilityHooks, SafeCompletionHooks,
    TracingObservabilityHooks,
};
use pprovider::{CompletionClient, CompletionHooks, CompletionService};

use crate::{ParleyConfig, ParleyError};

/// Tracing plus metrics, isolated so a misbehaving recorder cannot fail a call.
pub fn default_hooks() -> Arc<dyn CompletionHooks> {
    Arc::new(SafeCompletionHooks::new(CombinedCompletionHooks::new(
        TracingObservabilityHooks,
        MetricsObservabilityHooks,
    )))
}

pub fn in_memory_store() -> Arc<dyn TranscriptStore> {
    Arc::new(InMemoryTranscriptStore::new())
}

pub fn build_store(config: &ParleyConfig) -> Result<Arc<dyn TranscriptStore>, ParleyError> {
    Ok(create_transcript_store(config.store.clone())?)
}

#[cfg(feature = "http-transport")]
pub fn build_client(config: &ParleyConfig) -> Result<CompletionClient, ParleyError> {
    let client = CompletionClient::from_config(config.client_config())?;
    Ok(client.with_hooks(default_hooks()))
}

#[cfg(feature = "http-transport")]
pub async fn open_chat_session(config: &ParleyConfig) -> Result<ChatSession, ParleyError> {
    let client = build_client(config)?;
    let store = build_store(config)?;
    Ok(open_chat_session_with(config, Arc::new(client), store).await)
}

pub async fn open_chat_session_with(
    config: &ParleyConfig,
    service: Arc<dyn CompletionService>,
    store: Arc<dyn TranscriptStore>,
) -> ChatSession {
    ChatSession::open_with_key(service, store, config.transcript_key.clone()).await
}
