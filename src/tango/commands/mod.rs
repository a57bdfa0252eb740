use crate::config::TangoConfig;
use crate::error::{Result, TangoError};
use crate::index::ListedEntry;
use crate::model::VocabularyEntry;
use crate::store::vocab_store::RepairReport;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod doctor;
pub mod export;
pub mod fill_readings;
pub mod helpers;
pub mod list;
pub mod search;
pub mod update;

/// Filesystem locations a session works with.
#[derive(Debug, Clone)]
pub struct TangoPaths {
    /// Holds the vocabulary slot and `config.json`.
    pub data_dir: PathBuf,
}

impl TangoPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve a possibly relative path against the data directory.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        if path.trim().is_empty() {
            return Err(TangoError::Api("Empty path".to_string()));
        }
        let path = PathBuf::from(path);
        Ok(if path.is_absolute() {
            path
        } else {
            self.data_dir.join(path)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<VocabularyEntry>,
    pub listed_entries: Vec<ListedEntry>,
    /// Size of the whole collection, for "n of total" summaries.
    pub total: usize,
    pub export_path: Option<PathBuf>,
    pub repair: Option<RepairReport>,
    pub config: Option<TangoConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<VocabularyEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<ListedEntry>, total: usize) -> Self {
        self.listed_entries = entries;
        self.total = total;
        self
    }

    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = Some(path);
        self
    }

    pub fn with_repair(mut self, report: RepairReport) -> Self {
        self.repair = Some(report);
        self
    }

    pub fn with_config(mut self, config: TangoConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Field values for a new entry. Empty strings are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub kanji: String,
    pub hiragana: String,
    pub romaji: String,
    pub vietnamese: String,
}

impl EntryDraft {
    pub fn new(
        kanji: impl Into<String>,
        hiragana: impl Into<String>,
        romaji: impl Into<String>,
        vietnamese: impl Into<String>,
    ) -> Self {
        Self {
            kanji: kanji.into(),
            hiragana: hiragana.into(),
            romaji: romaji.into(),
            vietnamese: vietnamese.into(),
        }
    }

    pub fn into_entry(self) -> VocabularyEntry {
        VocabularyEntry::new(self.kanji, self.hiragana, self.romaji, self.vietnamese)
    }
}

/// A partial edit: `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub kanji: Option<String>,
    pub hiragana: Option<String>,
    pub romaji: Option<String>,
    pub vietnamese: Option<String>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.kanji.is_none()
            && self.hiragana.is_none()
            && self.romaji.is_none()
            && self.vietnamese.is_none()
    }

    /// The current entry with the given fields overwritten.
    pub fn apply_to(&self, current: &VocabularyEntry) -> VocabularyEntry {
        let mut entry = current.clone();
        if let Some(kanji) = &self.kanji {
            entry.kanji = kanji.clone();
        }
        if let Some(hiragana) = &self.hiragana {
            entry.hiragana = hiragana.clone();
        }
        if let Some(romaji) = &self.romaji {
            entry.romaji = romaji.clone();
        }
        if let Some(vietnamese) = &self.vietnamese {
            entry.vietnamese = vietnamese.clone();
        }
        entry
    }
}
