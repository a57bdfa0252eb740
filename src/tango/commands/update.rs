use crate::commands::add::headword;
use crate::commands::helpers::{autofill, resolve_selector};
use crate::commands::{CmdMessage, CmdResult, EntryUpdate};
use crate::error::{Result, TangoError};
use crate::index::{EntrySelector, ListedEntry};
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;
use crate::transliterate::Transliterator;

/// Overwrite the given fields of one entry, keeping its position and identity.
pub fn run<S: KeyValueStore>(
    store: &mut VocabularyStore<S>,
    selector: &EntrySelector,
    update: &EntryUpdate,
    transliterator: Option<&dyn Transliterator>,
) -> Result<CmdResult> {
    if update.is_empty() {
        return Err(TangoError::Api("Nothing to update".to_string()));
    }

    let position = resolve_selector(store, selector)?;
    let mut entry = update.apply_to(store.get(position)?);
    let mut result = CmdResult::default();

    if let Some(t) = transliterator {
        for message in autofill(&mut entry, t) {
            result.add_message(message);
        }
    }

    let stored = store.update(position, entry)?;
    result.add_message(CmdMessage::success(format!(
        "Updated {}: {}",
        position + 1,
        headword(&stored.kanji, &stored.hiragana)
    )));
    result.listed_entries.push(ListedEntry {
        position,
        entry: stored.clone(),
    });
    result.total = store.len();
    Ok(result.with_affected_entries(vec![stored]))
}
