use super::KeyValueStore;
use crate::error::{Result, TangoError};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value, e.g. to test recovery from bad data.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(TangoError::Store("Simulated write error".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::VocabularyEntry;
    use crate::store::vocab_store::VocabularyStore;

    /// The two-verb collection used throughout the tests.
    pub fn verbs() -> Vec<VocabularyEntry> {
        vec![
            VocabularyEntry::new("食べます", "たべます", "tabemasu", "ăn"),
            VocabularyEntry::new("飲みます", "のみます", "nomimasu", "uống"),
        ]
    }

    pub struct StoreFixture {
        pub store: VocabularyStore<InMemoryStore>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        /// Empty durable slot, empty seed.
        pub fn new() -> Self {
            Self {
                store: VocabularyStore::load_with_seed(InMemoryStore::new(), Vec::new()),
            }
        }

        pub fn with_entries(mut self, entries: Vec<VocabularyEntry>) -> Self {
            for entry in entries {
                self.store.add(entry).unwrap();
            }
            self
        }

        pub fn with_verbs(self) -> Self {
            self.with_entries(verbs())
        }

        pub fn with_numbered(self, count: usize) -> Self {
            let entries = (1..=count)
                .map(|i| {
                    VocabularyEntry::new(
                        format!("語{}", i),
                        format!("ご{}", i),
                        format!("go{}", i),
                        format!("từ {}", i),
                    )
                })
                .collect();
            self.with_entries(entries)
        }
    }
}
