use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, TangoError};
use crate::store::vocab_store::VocabularyStore;
use crate::store::KeyValueStore;
use std::path::Path;

/// Default export file name.
pub const EXPORT_FILE_NAME: &str = "vocabularies.json";

/// Write the whole collection as pretty JSON into `dir/file_name`.
/// Neither memory nor durable storage changes.
pub fn run<S: KeyValueStore>(
    store: &VocabularyStore<S>,
    dir: &Path,
    file_name: &str,
) -> Result<CmdResult> {
    let file_name = sanitize_file_name(file_name)?;
    let path = store.export_to(dir, &file_name)?;

    let mut result = CmdResult::default();
    if store.is_empty() {
        result.add_message(CmdMessage::info("Collection is empty; exported an empty list."));
    }
    result.add_message(CmdMessage::success(format!(
        "Exported {} entries to {}",
        store.len(),
        path.display()
    )));
    result.total = store.len();
    Ok(result.with_export_path(path))
}

/// The export name must be a bare file name; directories go in `dir`.
fn sanitize_file_name(name: &str) -> Result<String> {
    let name = name.trim();
    let bare = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| *n == name && !n.is_empty());
    match bare {
        Some(n) => Ok(n.to_string()),
        None => Err(TangoError::Api(format!(
            "Export file name must not contain a path: {}",
            name
        ))),
    }
}
