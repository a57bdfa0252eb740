//! The default dataset shipped inside the binary.
//!
//! Used only when the durable slot is empty or unreadable. It is read-only:
//! callers get clones, and nothing writes it back until a mutation happens.

use crate::model::VocabularyEntry;
use once_cell::sync::Lazy;

const BUNDLED_JSON: &str = include_str!("data/vocabularies.json");

static BUNDLED: Lazy<Vec<VocabularyEntry>> =
    Lazy::new(|| match serde_json::from_str(BUNDLED_JSON) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("bundled vocabulary dataset is malformed: {}", e);
            Vec::new()
        }
    });

/// The bundled default collection.
pub fn default_dataset() -> &'static [VocabularyEntry] {
    &BUNDLED
}
