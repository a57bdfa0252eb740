use crate::commands::add::headword;
use crate::commands::helpers::resolve_selector;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::EntrySelector;
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;

/// Remove one entry. Every later display number shifts down by one.
pub fn run<S: KeyValueStore>(
    store: &mut VocabularyStore<S>,
    selector: &EntrySelector,
) -> Result<CmdResult> {
    let position = resolve_selector(store, selector)?;
    let removed = store.remove(position)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted {}: {}",
        position + 1,
        headword(&removed.kanji, &removed.hiragana)
    )));
    result.total = store.len();
    Ok(result.with_affected_entries(vec![removed]))
}
