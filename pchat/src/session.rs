//! Persistent conversation driven through a completion service.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use pcommon::TranscriptKey;
use pmemory::TranscriptStore;
use pprovider::{AssistantReply, CancellationToken, CompletionService, Turn};

use crate::{ChatError, StoreAction};

/// One conversation: the committed turns plus where they are persisted.
///
/// A send either commits both the user turn and the reply, or leaves the
/// history exactly as it was before the call.
pub struct ChatSession {
    service: Arc<dyn CompletionService>,
    store: Arc<dyn TranscriptStore>,
    key: TranscriptKey,
    turns: Vec<Turn>,
}

impl ChatSession {
    pub async fn open(
        service: Arc<dyn CompletionService>,
        store: Arc<dyn TranscriptStore>,
    ) -> Self {
        Self::open_with_key(service, store, TranscriptKey::default()).await
    }

    /// Loads whatever the store holds under `key`; unreadable history starts empty.
    pub async fn open_with_key(
        service: Arc<dyn CompletionService>,
        store: Arc<dyn TranscriptStore>,
        key: TranscriptKey,
    ) -> Self {
        let turns = store.load(&key).await;
        Self {
            service,
            store,
            key,
            turns,
        }
    }

    pub fn key(&self) -> &TranscriptKey {
        &self.key
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub async fn send(&mut self, user_input: &str) -> Result<AssistantReply, ChatError> {
        self.send_with_cancellation(user_input, &CancellationToken::new())
            .await
    }

    pub async fn send_with_cancellation(
        &mut self,
        user_input: &str,
        cancel: &CancellationToken,
    ) -> Result<AssistantReply, ChatError> {
        let text = user_input.trim();
        if text.is_empty() {
            return Err(ChatError::invalid_input("message must not be empty"));
        }

        let checkpoint = self.turns.len();
        self.turns.push(Turn::user(text));

        let outcome = self.service.complete(&self.turns, cancel).await;
        let reply = match outcome {
            Ok(reply) => reply,
            Err(error) => {
                self.turns.truncate(checkpoint);
                return Err(error.into());
            }
        };

        self.turns.push(reply.clone().into_turn());
        let saved = self.store.save(&self.key, &self.turns).await;
        if let Err(error) = saved {
            self.turns.truncate(checkpoint);
            return Err(error.into());
        }

        Ok(reply)
    }

    /// Clears persisted history first; the in-memory turns survive a store failure.
    pub async fn clear_history(&mut self) -> Result<(), ChatError> {
        self.store
            .clear(&self.key)
            .await
            .map_err(|error| ChatError::store(StoreAction::Clear, error))?;
        self.turns.clear();
        Ok(())
    }
}

impl Debug for ChatSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("key", &self.key)
            .field("turns", &self.turns.len())
            .finish_non_exhaustive()
    }
}
