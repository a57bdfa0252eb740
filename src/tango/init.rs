use crate::api::{TangoPaths, VocabApi};
use crate::config::TangoConfig;
use crate::error::{Result, TangoError};
use crate::store::fs::FileStore;
use crate::store::vocab_store::VocabularyStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "TANGO_HOME";

pub struct TangoContext {
    pub api: VocabApi<FileStore>,
}

/// Pick the data directory: explicit flag, then `$TANGO_HOME`, then the
/// platform data directory.
pub fn resolve_data_dir(flag: Option<&Path>, env_home: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(home) = env_home.map(str::trim).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "tango", "tango")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TangoError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(data_dir_flag: Option<&Path>) -> Result<TangoContext> {
    let env_home = std::env::var(HOME_ENV).ok();
    let data_dir = resolve_data_dir(data_dir_flag, env_home.as_deref())?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let config = match TangoConfig::load(&data_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!("invalid config.json, using defaults: {}", e);
            TangoConfig::default()
        }
    };

    let store = VocabularyStore::load(FileStore::new(data_dir.clone()));
    let api = VocabApi::new(store, TangoPaths::new(data_dir), config);
    Ok(TangoContext { api })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::vocab_store::LoadSource;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn flag_wins_over_env() {
        let dir = resolve_data_dir(Some(Path::new("/tmp/flag")), Some("/tmp/env")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/flag"));
    }

    #[test]
    fn env_is_used_without_flag() {
        let dir = resolve_data_dir(None, Some("/tmp/env")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/env"));
    }

    #[test]
    fn blank_env_is_ignored() {
        let dir = resolve_data_dir(None, Some("  "));
        if let Ok(dir) = dir {
            assert_ne!(dir, PathBuf::from("  "));
        }
    }

    #[test]
    fn initialize_starts_from_bundled_dataset() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(Some(temp.path())).unwrap();

        assert_eq!(ctx.api.store().source(), LoadSource::Seed);
        assert!(!ctx.api.store().is_empty());
        // Nothing is written until the first mutation.
        assert!(!temp.path().join("vocabularies.json").exists());
    }

    #[test]
    fn initialize_tolerates_broken_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), "{").unwrap();
        let ctx = initialize(Some(temp.path())).unwrap();
        assert_eq!(ctx.api.settings(), &TangoConfig::default());
    }
}
