use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;
use crate::transliterate::{Script, Transliterator};
use tracing::debug;

/// Back-fill empty readings across the whole collection.
///
/// Empty hiragana is derived from the kanji field (reading table, or the kanji
/// field itself when it is kana). Empty romaji is derived from hiragana.
/// Entries that cannot be converted are left as they are. The collection is
/// written once, and only if something changed.
pub fn run<S: KeyValueStore>(
    store: &mut VocabularyStore<S>,
    transliterator: &dyn Transliterator,
) -> Result<CmdResult> {
    let mut entries = store.all().to_vec();
    let mut hiragana_filled = 0;
    let mut romaji_filled = 0;
    let mut unresolved = Vec::new();

    for (position, entry) in entries.iter_mut().enumerate() {
        if entry.hiragana.trim().is_empty() && !entry.kanji.trim().is_empty() {
            match transliterator.convert(&entry.kanji, Script::Hiragana) {
                Ok(hiragana) if !hiragana.is_empty() => {
                    entry.hiragana = hiragana;
                    hiragana_filled += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(position, kanji = %entry.kanji, "no reading: {}", e);
                    unresolved.push(position + 1);
                }
            }
        }
        if entry.romaji.trim().is_empty() && !entry.hiragana.trim().is_empty() {
            match transliterator.convert(&entry.hiragana, Script::Romaji) {
                Ok(romaji) => {
                    entry.romaji = romaji;
                    romaji_filled += 1;
                }
                Err(e) => {
                    debug!(position, hiragana = %entry.hiragana, "no romaji: {}", e);
                    unresolved.push(position + 1);
                }
            }
        }
    }

    let mut result = CmdResult::default();
    if hiragana_filled + romaji_filled > 0 {
        store.replace_all(entries)?;
        result.add_message(CmdMessage::success(format!(
            "Filled {} hiragana and {} romaji reading(s).",
            hiragana_filled, romaji_filled
        )));
    } else {
        result.add_message(CmdMessage::info("No readings to fill."));
    }

    if !unresolved.is_empty() {
        unresolved.dedup();
        let list: Vec<String> = unresolved.iter().map(|n| n.to_string()).collect();
        result.add_message(CmdMessage::warning(format!(
            "No reading found for entries: {}",
            list.join(", ")
        )));
    }

    result.total = store.len();
    Ok(result)
}
