use crate::commands::helpers::autofill;
use crate::commands::{CmdMessage, CmdResult, EntryDraft};
use crate::error::Result;
use crate::index::ListedEntry;
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;
use crate::transliterate::Transliterator;

/// Append a new entry. With a transliterator, empty kana fields are derived
/// first. No validation: an entry with every field empty is accepted.
pub fn run<S: KeyValueStore>(
    store: &mut VocabularyStore<S>,
    draft: EntryDraft,
    transliterator: Option<&dyn Transliterator>,
) -> Result<CmdResult> {
    let mut entry = draft.into_entry();
    let mut result = CmdResult::default();

    if let Some(t) = transliterator {
        for message in autofill(&mut entry, t) {
            result.add_message(message);
        }
    }

    let stored = store.add(entry)?;

    let position = store.len() - 1;
    result.add_message(CmdMessage::success(format!(
        "Added {}: {}",
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

/// Kanji when present, otherwise the kana.
pub(crate) fn headword<'a>(kanji: &'a str, hiragana: &'a str) -> &'a str {
    if kanji.is_empty() {
        hiragana
    } else {
        kanji
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TangoError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::transliterate::{KanaTransliterator, ReadingTable};

    #[test]
    fn appends_and_reports_display_number() {
        let mut fixture = StoreFixture::new().with_verbs();
        let draft = EntryDraft::new("男", "おとこ", "otoko", "đàn ông");

        let result = run(&mut fixture.store, draft, None).unwrap();

        assert_eq!(fixture.store.len(), 3);
        assert_eq!(result.listed_entries[0].display_number(), 3);
        assert_eq!(result.affected_entries[0].kanji, "男");
        assert!(result.affected_entries[0].id.is_some());
        assert!(result.messages[0].content.contains("男"));
    }

    #[test]
    fn without_transliterator_fields_stay_as_typed() {
        let mut fixture = StoreFixture::new();
        run(&mut fixture.store, EntryDraft::new("", "おんな", "", ""), None).unwrap();
        assert_eq!(fixture.store.all()[0].romaji, "");
    }

    #[test]
    fn with_transliterator_fills_missing_readings() {
        let mut fixture = StoreFixture::new();
        let t = KanaTransliterator::new(ReadingTable::builtin());

        run(
            &mut fixture.store,
            EntryDraft::new("", "おんな", "", "phụ nữ"),
            Some(&t),
        )
        .unwrap();
        assert_eq!(fixture.store.all()[0].romaji, "onna");
    }

    #[test]
    fn all_empty_entry_is_accepted() {
        let mut fixture = StoreFixture::new();
        run(&mut fixture.store, EntryDraft::default(), None).unwrap();
        assert_eq!(fixture.store.len(), 1);
    }

    #[test]
    fn persistence_failure_is_reported_but_kept_in_memory() {
        let mut fixture = StoreFixture::new().with_verbs();
        fixture.store.backend.set_simulate_write_error(true);

        let err = run(
            &mut fixture.store,
            EntryDraft::new("肉", "にく", "niku", "thịt"),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TangoError::Persistence(_)));
        assert_eq!(fixture.store.len(), 3);
    }
}
