//! Transcript store trait, in-memory store, and store construction.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pcommon::{BoxFuture, TranscriptKey};
use pprovider::Turn;

use crate::backends::filesystem::FilesystemTranscriptStore;
use crate::backends::sqlite::{SqliteTranscriptStore, default_sqlite_path};
use crate::error::MemoryError;
use crate::types::StoredTranscript;

/// Key-value persistence for conversations.
///
/// Implementors provide the fallible primitives; `load` and `save` are the
/// chat-facing contract built on top of them.
pub trait TranscriptStore: Send + Sync {
    fn load_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
    ) -> BoxFuture<'a, Result<Option<StoredTranscript>, MemoryError>>;

    fn save_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
        transcript: StoredTranscript,
    ) -> BoxFuture<'a, Result<(), MemoryError>>;

    /// Removing a key that holds nothing is not an error.
    fn clear<'a>(&'a self, key: &'a TranscriptKey) -> BoxFuture<'a, Result<(), MemoryError>>;

    /// Stored turns, oldest first. Read failures yield an empty history.
    fn load<'a>(&'a self, key: &'a TranscriptKey) -> BoxFuture<'a, Vec<Turn>> {
        Box::pin(async move {
            match self.load_transcript(key).await {
                Ok(Some(transcript)) => transcript.turns,
                Ok(None) => Vec::new(),
                Err(error) => {
                    tracing::warn!(
                        phase = "memory",
                        event = "load_failed",
                        key = %key,
                        error_kind = ?error.kind,
                        error = %error
                    );
                    Vec::new()
                }
            }
        })
    }

    fn save<'a>(
        &'a self,
        key: &'a TranscriptKey,
        turns: &'a [Turn],
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        self.save_transcript(key, StoredTranscript::now(turns.to_vec()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptStoreConfig {
    Sqlite { path: PathBuf },
    Filesystem { root: PathBuf },
    InMemory,
}

impl Default for TranscriptStoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: default_sqlite_path(),
        }
    }
}

pub fn create_transcript_store(
    config: TranscriptStoreConfig,
) -> Result<Arc<dyn TranscriptStore>, MemoryError> {
    match config {
        TranscriptStoreConfig::Sqlite { path } => Ok(Arc::new(SqliteTranscriptStore::new(path)?)),
        TranscriptStoreConfig::Filesystem { root } => {
            Ok(Arc::new(FilesystemTranscriptStore::new(root)?))
        }
        TranscriptStoreConfig::InMemory => Ok(Arc::new(InMemoryTranscriptStore::new())),
    }
}

pub fn create_default_transcript_store() -> Result<Arc<dyn TranscriptStore>, MemoryError> {
    create_transcript_store(TranscriptStoreConfig::default())
}

#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    entries: Mutex<HashMap<TranscriptKey, StoredTranscript>>,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TranscriptStore for InMemoryTranscriptStore {
    fn load_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
    ) -> BoxFuture<'a, Result<Option<StoredTranscript>, MemoryError>> {
        Box::pin(async move {
            let entries = self
                .entries
                .lock()
                .map_err(|_| MemoryError::storage("in-memory transcript store lock poisoned"))?;
            Ok(entries.get(key).cloned())
        })
    }

    fn save_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
        transcript: StoredTranscript,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| MemoryError::storage("in-memory transcript store lock poisoned"))?;
            entries.insert(key.clone(), transcript);
            Ok(())
        })
    }

    fn clear<'a>(&'a self, key: &'a TranscriptKey) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let mut entries = self
                .entries
                .lock()
                .map_err(|_| MemoryError::storage("in-memory transcript store lock poisoned"))?;
            entries.remove(key);
            Ok(())
        })
    }
}
