use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::vocab_store::{LoadSource, VocabularyStore};
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(store: &mut VocabularyStore<S>) -> Result<CmdResult> {
    let was_seed = store.source() == LoadSource::Seed;
    let report = store.repair()?;
    let mut result = CmdResult::default();

    if was_seed {
        result.add_message(CmdMessage::info(format!(
            "Saved the default word list ({} entries).",
            report.entries
        )));
    }

    if report.is_clean() {
        result.add_message(CmdMessage::success(format!(
            "No inconsistencies found in {} entries.",
            report.entries
        )));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        if report.fields_filled > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Filled {} missing field(s) with empty text.",
                report.fields_filled
            )));
        }
        if report.fields_dropped > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Dropped {} unexpected field(s).",
                report.fields_dropped
            )));
        }
    }

    result.total = store.len();
    Ok(result.with_repair(report))
}
