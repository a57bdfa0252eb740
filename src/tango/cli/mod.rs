//! # CLI Behavior
//!
//! This is **one possible UI client** for tango, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ### Naked Execution (`tango`)
//!
//! Running `tango` with no arguments defaults to `tango list`.
//!
//! ### Selecting Entries
//!
//! `edit` and `delete` take a SELECTOR: the number shown in the first column
//! of `list`/`search`, or the entry's UUID. Numbers shift after a delete;
//! UUIDs do not.
//!
//! ### Auto-filled Readings
//!
//! `add` and `edit` derive an empty romaji from the hiragana, and an empty
//! hiragana from the romaji or a known kanji word. `--no-convert` turns this off.
//!
//! ## Module Structure
//!
//! - `commands`: logging setup, context wiring and per-command handlers
//! - `render`: output formatting (tables, colors, messages)
//! - `setup`: argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
