use crate::commands::CmdMessage;
use crate::error::Result;
use crate::index::EntrySelector;
use crate::model::VocabularyEntry;
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;
use crate::transliterate::{Script, Transliterator};
use tracing::warn;

pub fn resolve_selector<S: KeyValueStore>(
    store: &VocabularyStore<S>,
    selector: &EntrySelector,
) -> Result<usize> {
    selector.resolve(store.all())
}

/// Fill empty `hiragana` / `romaji` from the other fields.
///
/// Hiragana comes from the romaji, or failing that from the kanji. Romaji
/// comes from the (possibly just filled) hiragana. Fields that already have
/// text are never touched, and a failed conversion leaves the field empty.
pub fn autofill<T: Transliterator + ?Sized>(
    entry: &mut VocabularyEntry,
    transliterator: &T,
) -> Vec<CmdMessage> {
    let mut messages = Vec::new();

    if entry.hiragana.trim().is_empty() {
        let sources = [entry.romaji.clone(), entry.kanji.clone()];
        let mut last_error = None;
        for source in sources.iter().filter(|s| !s.trim().is_empty()) {
            match transliterator.convert(source, Script::Hiragana) {
                Ok(hiragana) if !hiragana.is_empty() => {
                    messages.push(CmdMessage::info(format!("Filled hiragana: {}", hiragana)));
                    entry.hiragana = hiragana;
                    last_error = None;
                    break;
                }
                Ok(_) => {}
                Err(e) => last_error = Some(e),
            }
        }
        if let Some(e) = last_error {
            warn!("could not derive hiragana: {}", e);
            messages.push(CmdMessage::warning(format!(
                "Could not derive hiragana: {}",
                e
            )));
        }
    }

    if entry.romaji.trim().is_empty() && !entry.hiragana.trim().is_empty() {
        match transliterator.convert(&entry.hiragana, Script::Romaji) {
            Ok(romaji) => {
                messages.push(CmdMessage::info(format!("Filled romaji: {}", romaji)));
                entry.romaji = romaji;
            }
            Err(e) => {
                warn!("could not derive romaji from {}: {}", entry.hiragana, e);
                messages.push(CmdMessage::warning(format!(
                    "Could not derive romaji: {}",
                    e
                )));
            }
        }
    }

    messages
}
