use crate::error::{Result, TangoError};
use crate::model::SearchType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_EXPORT_FILE: &str = "vocabularies.json";

/// Known configuration keys, in display order.
pub const CONFIG_KEYS: [&str; 3] = ["search_type", "export_file", "readings_file"];

/// Settings for tango, stored in `<data dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TangoConfig {
    /// Field searched when no `--type` is given.
    #[serde(default)]
    pub search_type: SearchType,

    /// File name used by `export`.
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Extra kanji → hiragana map merged over the built-in table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readings_file: Option<String>,
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

impl Default for TangoConfig {
    fn default() -> Self {
        Self {
            search_type: SearchType::default(),
            export_file: default_export_file(),
            readings_file: None,
        }
    }
}

impl TangoConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TangoError::Io)?;
        let config: TangoConfig =
            serde_json::from_str(&content).map_err(TangoError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TangoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TangoError::Serialization)?;
        fs::write(config_path, content).map_err(TangoError::Io)?;
        Ok(())
    }

    /// Display value of a key. `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "search_type" => Some(self.search_type.to_string()),
            "export_file" => Some(self.export_file.clone()),
            "readings_file" => Some(self.readings_file.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Set a key from its text form. An empty `readings_file` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match key {
            "search_type" => match SearchType::from(value.to_string()) {
                SearchType::Unknown(other) => Err(format!(
                    "Unknown search type '{}' (expected romaji, hiragana or vietnamese)",
                    other
                )),
                search_type => {
                    self.search_type = search_type;
                    Ok(())
                }
            },
            "export_file" => {
                if value.is_empty() {
                    return Err("export_file cannot be empty".to_string());
                }
                self.export_file = value.to_string();
                Ok(())
            }
            "readings_file" => {
                self.readings_file = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
