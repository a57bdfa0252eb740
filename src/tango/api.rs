//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every tango operation, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Normalizes inputs**: selector strings become [`EntrySelector`]s, a
//!   missing search type falls back to the configured default
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal I/O and no formatting.
//!
//! `VocabApi<S: KeyValueStore>` is generic over the durable slot:
//! `VocabApi<FileStore>` in production, `VocabApi<InMemoryStore>` in tests.
//! API tests check dispatch and argument handling; command logic is tested
//! in the command modules.

use crate::commands;
use crate::config::TangoConfig;
use crate::error::Result;
use crate::index::EntrySelector;
use crate::model::{SearchFilters, SearchType, VocabularyEntry};
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;
use crate::transliterate::{KanaTransliterator, ReadingTable, Transliterator};
use std::path::Path;
use tracing::warn;

/// Owns the session's vocabulary collection and settings.
pub struct VocabApi<S: KeyValueStore> {
    store: VocabularyStore<S>,
    paths: commands::TangoPaths,
    config: TangoConfig,
    transliterator: KanaTransliterator,
}

impl<S: KeyValueStore> VocabApi<S> {
    pub fn new(store: VocabularyStore<S>, paths: commands::TangoPaths, config: TangoConfig) -> Self {
        let transliterator = KanaTransliterator::new(load_readings(&paths, &config));
        Self {
            store,
            paths,
            config,
            transliterator,
        }
    }

    pub fn list_entries(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    /// Search with the configured default field when `search_type` is `None`.
    pub fn search(
        &self,
        query: &str,
        search_type: Option<SearchType>,
    ) -> Result<commands::CmdResult> {
        let filters = self.filters(query, search_type);
        commands::search::run(&self.store, &filters)
    }

    /// The filtered view, without positions.
    pub fn filter(&self, filters: &SearchFilters) -> Vec<VocabularyEntry> {
        commands::search::filter(self.store.all(), filters)
    }

    pub fn add_entry(
        &mut self,
        draft: commands::EntryDraft,
        convert: bool,
    ) -> Result<commands::CmdResult> {
        let transliterator = converter(&self.transliterator, convert);
        commands::add::run(&mut self.store, draft, transliterator)
    }

    pub fn update_entry(
        &mut self,
        selector: &str,
        update: &commands::EntryUpdate,
        convert: bool,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(selector)?;
        let transliterator = converter(&self.transliterator, convert);
        commands::update::run(&mut self.store, &selector, update, transliterator)
    }

    pub fn delete_entry(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let selector = parse_selector(selector)?;
        commands::delete::run(&mut self.store, &selector)
    }

    /// Export into `dir` using the configured file name.
    pub fn export(&self, dir: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, dir, &self.config.export_file)
    }

    pub fn doctor(&mut self) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.store)
    }

    pub fn fill_readings(&mut self) -> Result<commands::CmdResult> {
        commands::fill_readings::run(&mut self.store, &self.transliterator)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            if config.readings_file != self.config.readings_file {
                self.transliterator = KanaTransliterator::new(load_readings(&self.paths, config));
            }
            self.config = config.clone();
        }
        Ok(result)
    }

    /// Re-read the durable slot, dropping any unsaved in-memory state.
    pub fn reload(&mut self) {
        self.store.reload();
    }

    pub fn store(&self) -> &VocabularyStore<S> {
        &self.store
    }

    pub fn paths(&self) -> &commands::TangoPaths {
        &self.paths
    }

    pub fn settings(&self) -> &TangoConfig {
        &self.config
    }

    fn filters(&self, query: &str, search_type: Option<SearchType>) -> SearchFilters {
        SearchFilters::new(
            query,
            search_type.unwrap_or_else(|| self.config.search_type.clone()),
        )
    }
}

fn converter(transliterator: &KanaTransliterator, convert: bool) -> Option<&dyn Transliterator> {
    if convert {
        Some(transliterator)
    } else {
        None
    }
}

fn parse_selector(input: &str) -> Result<EntrySelector> {
    input.parse()
}

/// Built-in readings, extended by the configured readings file when it loads.
fn load_readings(paths: &commands::TangoPaths, config: &TangoConfig) -> ReadingTable {
    let builtin = ReadingTable::builtin();
    let Some(file) = config.readings_file.as_deref() else {
        return builtin;
    };
    match paths.resolve(file).and_then(ReadingTable::load) {
        Ok(extra) => builtin.merge(extra),
        Err(e) => {
            warn!("ignoring readings file {}: {}", file, e);
            builtin
        }
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, EntryDraft, EntryUpdate, MessageLevel, TangoPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TangoError;
    use crate::store::memory::fixtures::verbs;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn api_with(dir: &TempDir, config: TangoConfig) -> VocabApi<InMemoryStore> {
        let store = VocabularyStore::load_with_seed(InMemoryStore::new(), verbs());
        VocabApi::new(store, TangoPaths::new(dir.path()), config)
    }

    fn api(dir: &TempDir) -> VocabApi<InMemoryStore> {
        api_with(dir, TangoConfig::default())
    }

    #[test]
    fn search_uses_configured_default_type() {
        let dir = TempDir::new().unwrap();
        let config = TangoConfig {
            search_type: SearchType::Vietnamese,
            ..Default::default()
        };
        let api = api_with(&dir, config);

        let result = api.search("uống", None).unwrap();
        assert_eq!(result.listed_entries.len(), 1);

        let result = api.search("uống", Some(SearchType::Romaji)).unwrap();
        assert!(result.listed_entries.is_empty());
    }

    #[test]
    fn add_then_delete_by_display_number() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);

        api.add_entry(EntryDraft::new("男", "おとこ", "", "đàn ông"), true)
            .unwrap();
        assert_eq!(api.store().all()[2].romaji, "otoko");

        api.delete_entry("3").unwrap();
        assert_eq!(api.store().len(), 2);
    }

    #[test]
    fn add_without_conversion_keeps_fields() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.add_entry(EntryDraft::new("", "おとこ", "", ""), false)
            .unwrap();
        assert_eq!(api.store().all()[2].romaji, "");
    }

    #[test]
    fn update_by_uuid_string() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.doctor().unwrap();
        let added = api
            .add_entry(EntryDraft::new("女", "おんな", "onna", ""), false)
            .unwrap();
        let id = added.affected_entries[0].id.unwrap().to_string();

        let update = EntryUpdate {
            vietnamese: Some("phụ nữ".into()),
            ..Default::default()
        };
        api.update_entry(&id, &update, false).unwrap();
        assert_eq!(api.store().all()[2].vietnamese, "phụ nữ");
    }

    #[test]
    fn invalid_selectors_are_errors() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        assert!(matches!(api.delete_entry("zero"), Err(TangoError::Api(_))));
        assert!(matches!(
            api.delete_entry("7"),
            Err(TangoError::OutOfRange { index: 6, len: 2 })
        ));
    }

    #[test]
    fn export_uses_configured_file_name() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir);
        api.config(ConfigAction::Set("export_file".into(), "words.json".into()))
            .unwrap();

        let out = TempDir::new().unwrap();
        let result = api.export(out.path()).unwrap();
        assert_eq!(result.export_path.unwrap(), out.path().join("words.json"));
    }

    #[test]
    fn readings_file_extends_transliteration() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readings.json"), r#"{"図書館":"としょかん"}"#).unwrap();
        let mut api = api(&dir);
        api.config(ConfigAction::Set("readings_file".into(), "readings.json".into()))
            .unwrap();

        api.add_entry(EntryDraft::new("図書館", "", "", "thư viện"), true)
            .unwrap();
        let added = &api.store().all()[2];
        assert_eq!(added.hiragana, "としょかん");
        assert_eq!(added.romaji, "toshokan");
    }

    #[test]
    fn broken_readings_file_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readings.json"), "not json").unwrap();
        let config = TangoConfig {
            readings_file: Some("readings.json".into()),
            ..Default::default()
        };
        let mut api = api_with(&dir, config);

        api.add_entry(EntryDraft::new("学校", "", "", ""), true)
            .unwrap();
        assert_eq!(api.store().all()[2].hiragana, "がっこう");
    }

    #[test]
    fn filter_is_pure() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);
        let filters = SearchFilters::new("TAB", SearchType::Romaji);
        let result = api.filter(&filters);
        assert_eq!(result.len(), 1);
        assert_eq!(api.store().len(), 2);
    }
}
