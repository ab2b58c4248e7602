use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use pcommon::{BoxFuture, TranscriptKey};
use pprovider::Turn;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::MemoryError;
use crate::store::TranscriptStore;
use crate::types::StoredTranscript;

#[derive(Debug)]
pub struct SqliteTranscriptStore {
    connection: Mutex<Connection>,
}

impl SqliteTranscriptStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|error| {
                MemoryError::storage(format!(
                    "failed to create sqlite parent directory: {error}"
                ))
            })?;
        }

        let connection = Connection::open(path).map_err(|error| {
            MemoryError::storage(format!("failed to open sqlite database: {error}"))
        })?;
        Self::from_connection(connection)
    }

    pub fn new_in_memory() -> Result<Self, MemoryError> {
        let connection = Connection::open_in_memory().map_err(|error| {
            MemoryError::storage(format!("failed to open in-memory sqlite database: {error}"))
        })?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, MemoryError> {
        connection
            .busy_timeout(Duration::from_secs(5))
            .map_err(|error| {
                MemoryError::storage(format!("failed to configure sqlite busy timeout: {error}"))
            })?;
        let store = Self {
            connection: Mutex::new(connection),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, MemoryError> {
        self.connection
            .lock()
            .map_err(|_| MemoryError::storage("sqlite transcript store lock poisoned"))
    }

    fn initialize_schema(&self) -> Result<(), MemoryError> {
        let conn = self.connection()?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS transcripts (
                key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                last_updated_ms INTEGER NOT NULL
            );
            ",
        )
        .map_err(|error| {
            MemoryError::storage(format!("failed to initialize sqlite schema: {error}"))
        })
    }
}

impl TranscriptStore for SqliteTranscriptStore {
    fn load_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
    ) -> BoxFuture<'a, Result<Option<StoredTranscript>, MemoryError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            let row = conn
                .query_row(
                    "SELECT payload, last_updated_ms FROM transcripts WHERE key = ?1",
                    params![key.as_str()],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
                )
                .optional()
                .map_err(|error| {
                    MemoryError::storage(format!("failed to query transcript row: {error}"))
                })?;

            let Some((payload, last_updated_ms)) = row else {
                return Ok(None);
            };
            let turns = serde_json::from_str::<Vec<Turn>>(&payload).map_err(|error| {
                MemoryError::serialization(format!("failed to deserialize transcript: {error}"))
            })?;
            Ok(Some(StoredTranscript::new(
                turns,
                u64::try_from(last_updated_ms).unwrap_or_default(),
            )))
        })
    }

    fn save_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
        transcript: StoredTranscript,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let payload = serde_json::to_string(&transcript.turns).map_err(|error| {
                MemoryError::serialization(format!("failed to serialize transcript: {error}"))
            })?;
            let last_updated_ms = i64::try_from(transcript.last_updated_ms).map_err(|_| {
                MemoryError::invalid_request("last_updated_ms does not fit in a sqlite integer")
            })?;

            let conn = self.connection()?;
            conn.execute(
                "
                INSERT INTO transcripts (key, payload, last_updated_ms)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    payload = excluded.payload,
                    last_updated_ms = excluded.last_updated_ms
                ",
                params![key.as_str(), payload, last_updated_ms],
            )
            .map_err(|error| MemoryError::storage(format!("failed to save transcript: {error}")))?;
            Ok(())
        })
    }

    fn clear<'a>(&'a self, key: &'a TranscriptKey) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let conn = self.connection()?;
            conn.execute(
                "DELETE FROM transcripts WHERE key = ?1",
                params![key.as_str()],
            )
            .map_err(|error| {
                MemoryError::storage(format!("failed to clear transcript: {error}"))
            })?;
            Ok(())
        })
    }
}

pub(crate) fn default_sqlite_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os("PARLEY_STORE_PATH") {
        return PathBuf::from(explicit);
    }

    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        return PathBuf::from(home).join(".parley").join("transcripts.sqlite3");
    }

    PathBuf::from("parley-transcripts.sqlite3")
}
