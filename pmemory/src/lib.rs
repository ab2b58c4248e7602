//! Transcript persistence for chat sessions.
//!
//! ```rust
//! use pcommon::TranscriptKey;
//! use pmemory::{InMemoryTranscriptStore, TranscriptStore};
//! use pprovider::Turn;
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .build()
//!     .expect("runtime should build");
//!
//! runtime.block_on(async {
//!     let store = InMemoryTranscriptStore::new();
//!     let key = TranscriptKey::default();
//!
//!     store
//!         .save(&key, &[Turn::user("hi"), Turn::assistant("hello")])
//!         .await
//!         .expect("save should succeed");
//!
//!     assert_eq!(store.load(&key).await.len(), 2);
//! });
//! ```

mod backends;
mod error;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        FilesystemTranscriptStore, InMemoryTranscriptStore, MemoryError, MemoryErrorKind,
        SqliteTranscriptStore, StoredTranscript, TranscriptStore, TranscriptStoreConfig,
        create_default_transcript_store, create_transcript_store,
    };
}

pub use backends::filesystem::FilesystemTranscriptStore;
pub use backends::sqlite::SqliteTranscriptStore;
pub use error::{MemoryError, MemoryErrorKind};
pub use store::{
    InMemoryTranscriptStore, TranscriptStore, TranscriptStoreConfig,
    create_default_transcript_store, create_transcript_store,
};
pub use types::StoredTranscript;
