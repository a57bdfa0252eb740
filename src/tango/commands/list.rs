use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::list_entries;
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(store: &VocabularyStore<S>) -> Result<CmdResult> {
    let listed = list_entries(store.all());
    Ok(CmdResult::default().with_listed_entries(listed, store.len()))
}
