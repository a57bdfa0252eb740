//! # Storage Layer
//!
//! Two levels live here:
//!
//! - [`KeyValueStore`]: the durable slot abstraction. It knows nothing about
//!   vocabulary; it maps a string key to a string value.
//! - [`vocab_store::VocabularyStore`]: the session's authoritative in-memory
//!   collection, mirrored into one key of a `KeyValueStore`.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage
//!   - Each key is a file `{key}.json` inside the data directory
//!   - Writes go to a temp file first and are renamed into place
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── vocabularies.json   # The whole collection (JSON array)
//! └── config.json         # Settings
//! ```
//!
//! The collection is always written wholesale: no diffs, no versions.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod vocab_store;

/// Key of the durable slot holding the collection.
pub const VOCABULARY_KEY: &str = "vocabularies";

/// Abstract interface for the durable key-value slot.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) when nothing has been stored yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    /// MUST replace the whole value or fail without a partial write.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
