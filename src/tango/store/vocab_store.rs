use super::fs::write_atomic;
use super::{KeyValueStore, VOCABULARY_KEY};
use crate::error::{Result, TangoError};
use crate::model::{field_needs_fill, VocabularyEntry, CORE_FIELDS};
use crate::seed::default_dataset;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Where the current in-memory collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from the durable slot (or written to it since).
    Durable,
    /// Fallback to the seed dataset; not yet written back.
    Seed,
}

/// Report from the `repair` operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub entries: usize,
    /// Core fields that were missing or not strings in the stored records.
    pub fields_filled: usize,
    /// Unexpected fields removed from entries.
    pub fields_dropped: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.fields_filled == 0 && self.fields_dropped == 0
    }
}

/// The session's authoritative vocabulary collection, mirrored into the
/// `"vocabularies"` slot of a [`KeyValueStore`].
///
/// Every mutation changes memory first and then overwrites the durable slot
/// with the whole collection. If that write fails the in-memory change is kept
/// and [`TangoError::Persistence`] is returned.
pub struct VocabularyStore<S: KeyValueStore> {
    /// The underlying durable slot.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: S,
    entries: Vec<VocabularyEntry>,
    seed: Vec<VocabularyEntry>,
    source: LoadSource,
    /// Core fields that were missing or not strings in the records read at load.
    /// Zero once the collection has been written back.
    unfilled_fields: usize,
}

impl<S: KeyValueStore> VocabularyStore<S> {
    /// Load the collection, falling back to the bundled dataset.
    pub fn load(backend: S) -> Self {
        Self::load_with_seed(backend, default_dataset().to_vec())
    }

    /// Load the collection, falling back to `seed` when the slot is empty or unreadable.
    pub fn load_with_seed(backend: S, seed: Vec<VocabularyEntry>) -> Self {
        let loaded = read_or_seed(&backend, &seed);
        Self {
            backend,
            entries: loaded.entries,
            seed,
            source: loaded.source,
            unfilled_fields: loaded.unfilled_fields,
        }
    }

    /// Discard the in-memory collection and read the durable slot again.
    pub fn reload(&mut self) {
        let loaded = read_or_seed(&self.backend, &self.seed);
        self.entries = loaded.entries;
        self.source = loaded.source;
        self.unfilled_fields = loaded.unfilled_fields;
    }

    pub fn all(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn get(&self, index: usize) -> Result<&VocabularyEntry> {
        self.entries.get(index).ok_or(TangoError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn position_of(&self, id: &Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.id.as_ref() == Some(id))
    }

    /// Append an entry. A missing id and creation date are assigned first.
    /// Returns the entry as stored.
    pub fn add(&mut self, mut entry: VocabularyEntry) -> Result<VocabularyEntry> {
        entry.ensure_identity();
        self.entries.push(entry.clone());
        self.persist()?;
        Ok(entry)
    }

    /// Replace the entry at `index`. The replaced entry's id and creation date
    /// carry over when `entry` has none. Returns the entry as stored.
    pub fn update(&mut self, index: usize, mut entry: VocabularyEntry) -> Result<VocabularyEntry> {
        let current = self.get(index)?;
        if entry.id.is_none() {
            entry.id = current.id;
        }
        if entry.date_added.is_none() {
            entry.date_added = current.date_added;
        }
        self.entries[index] = entry.clone();
        self.persist()?;
        Ok(entry)
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<VocabularyEntry> {
        self.get(index)?;
        let removed = self.entries.remove(index);
        self.persist()?;
        Ok(removed)
    }

    pub fn update_by_id(&mut self, id: &Uuid, entry: VocabularyEntry) -> Result<VocabularyEntry> {
        let index = self.position_of(id).ok_or(TangoError::NotFound(*id))?;
        self.update(index, entry)
    }

    pub fn remove_by_id(&mut self, id: &Uuid) -> Result<VocabularyEntry> {
        let index = self.position_of(id).ok_or(TangoError::NotFound(*id))?;
        self.remove(index)
    }

    /// Pretty-printed (2-space indent) JSON of the current collection.
    pub fn export_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).map_err(TangoError::Serialization)
    }

    /// Write the export into `dir/file_name`. Touches neither memory nor the slot.
    pub fn export_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        write_atomic(&path, &self.export_json()?)?;
        debug!(path = %path.display(), entries = self.entries.len(), "exported vocabulary");
        Ok(path)
    }

    /// Normalize every entry to the four core fields plus id/date, then persist.
    /// Running it again reports no changes.
    ///
    /// `fields_filled` counts what was missing in the records this session
    /// loaded and has not yet written back; the seed and written collections
    /// are always complete.
    pub fn repair(&mut self) -> Result<RepairReport> {
        let mut report = RepairReport {
            entries: self.entries.len(),
            fields_filled: self.unfilled_fields,
            fields_dropped: 0,
        };

        for entry in &mut self.entries {
            report.fields_dropped += entry.unexpected_field_count();
            *entry = entry.normalized();
        }

        self.persist()?;
        Ok(report)
    }

    /// Replace the whole collection in one write.
    pub(crate) fn replace_all(&mut self, entries: Vec<VocabularyEntry>) -> Result<()> {
        self.entries = entries;
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries).map_err(TangoError::Serialization)?;
        if let Err(e) = self.backend.set(VOCABULARY_KEY, &json) {
            warn!("failed to persist vocabulary: {}", e);
            return Err(TangoError::Persistence(e.to_string()));
        }
        self.source = LoadSource::Durable;
        self.unfilled_fields = 0;
        debug!(entries = self.entries.len(), "persisted vocabulary");
        Ok(())
    }
}

struct Loaded {
    entries: Vec<VocabularyEntry>,
    source: LoadSource,
    unfilled_fields: usize,
}

fn read_or_seed<S: KeyValueStore>(backend: &S, seed: &[VocabularyEntry]) -> Loaded {
    match backend.get(VOCABULARY_KEY) {
        Ok(Some(raw)) => match parse_stored(&raw) {
            Ok(loaded) => {
                debug!(entries = loaded.entries.len(), "loaded vocabulary from storage");
                return loaded;
            }
            Err(e) => warn!("failed to parse stored vocabularies, using defaults: {}", e),
        },
        Ok(None) => debug!("no stored vocabularies, using defaults"),
        Err(e) => warn!("failed to read stored vocabularies, using defaults: {}", e),
    }
    Loaded {
        entries: seed.to_vec(),
        source: LoadSource::Seed,
        unfilled_fields: 0,
    }
}

fn parse_stored(raw: &str) -> serde_json::Result<Loaded> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let unfilled_fields = records
        .iter()
        .map(|record| {
            CORE_FIELDS
                .iter()
                .filter(|field| field_needs_fill(record, field))
                .count()
        })
        .sum();
    let entries = records
        .into_iter()
        .map(serde_json::from_value)
        .collect::<serde_json::Result<Vec<VocabularyEntry>>>()?;
    Ok(Loaded {
        entries,
        source: LoadSource::Durable,
        unfilled_fields,
    })
}
