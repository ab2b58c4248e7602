use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pcommon::{BoxFuture, TranscriptKey};

use crate::error::MemoryError;
use crate::store::TranscriptStore;
use crate::types::StoredTranscript;

/// One pretty-printed JSON file per key under `<root>/transcripts/`.
#[derive(Debug)]
pub struct FilesystemTranscriptStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl FilesystemTranscriptStore {
    pub fn new(root: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("transcripts")).map_err(|error| {
            MemoryError::storage(format!("failed to create transcript store root: {error}"))
        })?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn transcript_path(&self, key: &TranscriptKey) -> PathBuf {
        self.root
            .join("transcripts")
            .join(format!("{}.json", hex_encode(key.as_str().as_bytes())))
    }

    fn read(&self, key: &TranscriptKey) -> Result<Option<StoredTranscript>, MemoryError> {
        let path = self.transcript_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|error| {
            MemoryError::storage(format!("failed to read transcript file: {error}"))
        })?;
        let transcript = serde_json::from_slice::<StoredTranscript>(&bytes).map_err(|error| {
            MemoryError::serialization(format!("failed to deserialize transcript: {error}"))
        })?;
        Ok(Some(transcript))
    }

    fn write(&self, key: &TranscriptKey, transcript: &StoredTranscript) -> Result<(), MemoryError> {
        let bytes = serde_json::to_vec_pretty(transcript).map_err(|error| {
            MemoryError::serialization(format!("failed to serialize transcript: {error}"))
        })?;
        write_atomic(&self.transcript_path(key), &bytes)
    }
}

impl TranscriptStore for FilesystemTranscriptStore {
    fn load_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
    ) -> BoxFuture<'a, Result<Option<StoredTranscript>, MemoryError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| MemoryError::storage("filesystem transcript store lock poisoned"))?;
            self.read(key)
        })
    }

    fn save_transcript<'a>(
        &'a self,
        key: &'a TranscriptKey,
        transcript: StoredTranscript,
    ) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| MemoryError::storage("filesystem transcript store lock poisoned"))?;
            self.write(key, &transcript)
        })
    }

    fn clear<'a>(&'a self, key: &'a TranscriptKey) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| MemoryError::storage("filesystem transcript store lock poisoned"))?;
            let path = self.transcript_path(key);
            if !path.exists() {
                return Ok(());
            }
            fs::remove_file(&path).map_err(|error| {
                MemoryError::storage(format!("failed to remove transcript file: {error}"))
            })
        })
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), MemoryError> {
    let Some(parent) = path.parent() else {
        return Err(MemoryError::storage(
            "transcript file missing parent directory",
        ));
    };
    fs::create_dir_all(parent).map_err(|error| {
        MemoryError::storage(format!("failed to create parent directory: {error}"))
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|error| {
        MemoryError::storage(format!("failed to write temporary transcript file: {error}"))
    })?;

    if path.exists() {
        fs::remove_file(path).map_err(|error| {
            MemoryError::storage(format!("failed to replace existing transcript file: {error}"))
        })?;
    }
    fs::rename(&tmp, path).map_err(|error| {
        MemoryError::storage(format!("failed to finalize transcript file: {error}"))
    })
}

fn hex_encode(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    for byte in input {
        output.push(nibble_to_hex(byte >> 4));
        output.push(nibble_to_hex(byte & 0x0f));
    }
    output
}

fn nibble_to_hex(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        10..=15 => (b'a' + (nibble - 10)) as char,
        _ => '0',
    }
}
