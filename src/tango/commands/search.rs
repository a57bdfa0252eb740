//! Query filtering over the collection.
//!
//! Matching is plain substring containment on one field:
//!
//! - `romaji` / `vietnamese`: case-insensitive, the query is used as typed
//!   (surrounding spaces are part of the needle);
//! - `hiragana`: case-sensitive, the query is trimmed first;
//! - any other search type matches nothing.
//!
//! An empty or all-whitespace query returns the whole collection.

use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::ListedEntry;
use crate::model::{SearchFilters, SearchType, VocabularyEntry};
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;

/// Matching entries paired with their position in `entries`, in collection order.
pub fn filter_indexed<'a>(
    entries: &'a [VocabularyEntry],
    filters: &SearchFilters,
) -> Vec<(usize, &'a VocabularyEntry)> {
    let indexed = entries.iter().enumerate();
    if filters.query.trim().is_empty() {
        return indexed.collect();
    }
    indexed
        .filter(|(_, entry)| matches(entry, &filters.query, &filters.search_type))
        .collect()
}

/// The filtered view of `entries`.
pub fn filter(entries: &[VocabularyEntry], filters: &SearchFilters) -> Vec<VocabularyEntry> {
    filter_indexed(entries, filters)
        .into_iter()
        .map(|(_, entry)| entry.clone())
        .collect()
}

fn matches(entry: &VocabularyEntry, query: &str, search_type: &SearchType) -> bool {
    match search_type {
        SearchType::Romaji => contains_ignore_case(&entry.romaji, query),
        SearchType::Vietnamese => contains_ignore_case(&entry.vietnamese, query),
        SearchType::Hiragana => entry.hiragana.contains(query.trim()),
        SearchType::Unknown(_) => false,
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn run<S: KeyValueStore>(
    store: &VocabularyStore<S>,
    filters: &SearchFilters,
) -> Result<CmdResult> {
    let listed = filter_indexed(store.all(), filters)
        .into_iter()
        .map(|(position, entry)| ListedEntry {
            position,
            entry: entry.clone(),
        })
        .collect();
    Ok(CmdResult::default().with_listed_entries(listed, store.len()))
}
