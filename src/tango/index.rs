//! # Entry Addressing
//!
//! Internally an entry is addressed by its **position** in the collection
//! (0-based), which is what [`VocabularyStore`](crate::store::vocab_store::VocabularyStore)
//! operates on. Positions are fragile: removing an entry shifts every later one.
//!
//! Users see 1-based display numbers in listings, and may instead refer to an
//! entry by its stable UUID, which survives reordering.
//!
//! | Input                                  | Selector                 |
//! |----------------------------------------|--------------------------|
//! | `3`                                    | `Position(2)`            |
//! | `1b4e28ba-2fa1-11d2-883f-0016d3cca427` | `Id(..)`                 |
//! | `0`, `-1`, `abc`                       | error                    |

use crate::error::{Result, TangoError};
use crate::model::VocabularyEntry;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How a caller picks one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySelector {
    /// 0-based position in the collection.
    Position(usize),
    Id(Uuid),
}

impl EntrySelector {
    /// Resolve to a current position.
    pub fn resolve(&self, entries: &[VocabularyEntry]) -> Result<usize> {
        match self {
            EntrySelector::Position(index) if *index < entries.len() => Ok(*index),
            EntrySelector::Position(index) => Err(TangoError::OutOfRange {
                index: *index,
                len: entries.len(),
            }),
            EntrySelector::Id(id) => entries
                .iter()
                .position(|e| e.id.as_ref() == Some(id))
                .ok_or(TangoError::NotFound(*id)),
        }
    }
}

impl FromStr for EntrySelector {
    type Err = TangoError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return match n {
                0 => Err(TangoError::Api("Entry numbers start at 1".to_string())),
                n => Ok(EntrySelector::Position(n - 1)),
            };
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(EntrySelector::Id(id));
        }
        Err(TangoError::Api(format!("Invalid entry selector: {}", s)))
    }
}

impl fmt::Display for EntrySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntrySelector::Position(index) => write!(f, "{}", index + 1),
            EntrySelector::Id(id) => write!(f, "{}", id),
        }
    }
}

/// An entry together with its position, as produced by listings and searches.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedEntry {
    /// 0-based position in the full collection.
    pub position: usize,
    pub entry: VocabularyEntry,
}

impl ListedEntry {
    /// 1-based number shown to users.
    pub fn display_number(&self) -> usize {
        self.position + 1
    }
}

pub fn list_entries(entries: &[VocabularyEntry]) -> Vec<ListedEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| ListedEntry {
            position,
            entry: entry.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_numbers_as_positions() {
        assert_eq!(
            "3".parse::<EntrySelector>().unwrap(),
            EntrySelector::Position(2)
        );
        assert_eq!(
            " 1 ".parse::<EntrySelector>().unwrap(),
            EntrySelector::Position(0)
        );
    }

    #[test]
    fn parses_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<EntrySelector>().unwrap(),
            EntrySelector::Id(id)
        );
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!("0".parse::<EntrySelector>().is_err());
        assert!("-1".parse::<EntrySelector>().is_err());
        assert!("abc".parse::<EntrySelector>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let sel = EntrySelector::Position(4);
        assert_eq!(sel.to_string(), "5");
        assert_eq!(sel.to_string().parse::<EntrySelector>().unwrap(), sel);
    }

    #[test]
    fn resolves_against_entries() {
        let mut entries = vec![
            VocabularyEntry::new("北", "きた", "kita", "phía bắc"),
            VocabularyEntry::new("区", "く", "ku", "quận"),
        ];
        entries[1].ensure_identity();
        let id = entries[1].id.unwrap();

        assert_eq!(EntrySelector::Position(1).resolve(&entries).unwrap(), 1);
        assert_eq!(EntrySelector::Id(id).resolve(&entries).unwrap(), 1);
        assert!(matches!(
            EntrySelector::Position(2).resolve(&entries),
            Err(TangoError::OutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            EntrySelector::Id(Uuid::new_v4()).resolve(&entries),
            Err(TangoError::NotFound(_))
        ));
    }

    #[test]
    fn list_entries_numbers_from_one() {
        let entries = vec![VocabularyEntry::new("町", "まち", "machi", "thị trấn")];
        let listed = list_entries(&entries);
        assert_eq!(listed[0].position, 0);
        assert_eq!(listed[0].display_number(), 1);
    }
}
