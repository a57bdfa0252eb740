//! # Tango Architecture
//!
//! Tango is a **Japanese vocabulary notebook library**: a list of words with
//! kanji, hiragana, romaji and a Vietnamese meaning, kept in one durable
//! key-value slot and searched by substring. It is a library that happens to
//! have a CLI client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (selectors, default search field)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult                        │
//! │  - Search is a pure function of (entries, filters)          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - VocabularyStore: in-memory collection + durable mirror   │
//! │  - KeyValueStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Model
//!
//! A [`store::vocab_store::VocabularyStore`] is built once per session. It
//! loads the `"vocabularies"` slot, or the bundled dataset ([`seed`]) when the
//! slot is empty or unreadable. Every mutation updates memory and then writes
//! the whole collection back before returning.
//!
//! Entries are addressed by position (shown 1-based), or by a stable UUID
//! assigned when an entry is added. See [`index`].
//!
//! ## Module Overview
//!
//! - [`api`]: the API facade, entry point for all operations
//! - [`commands`]: business logic for each command
//! - [`store`]: storage abstraction and the vocabulary store
//! - [`model`]: `VocabularyEntry`, `SearchType`, `SearchFilters`
//! - [`index`]: entry selectors and positional listings
//! - [`transliterate`]: kana/romaji conversion and kanji readings
//! - [`config`]: configuration management
//! - [`init`]: data directory resolution and session setup
//! - [`seed`]: the bundled default dataset
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod seed;
pub mod store;
pub mod transliterate;
