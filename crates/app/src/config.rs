//! Settings persisted as JSON.
//!
//! Stored in `<config_dir>/snaprect/config.json` as `{section: {key: value}}`.
//! A missing or corrupt file loads as defaults; every `set_value` writes
//! the file back.

use export::settings::{
    SettingsStore, DEFAULT_SAVE_OP, DEFAULT_SAVE_QUALITY, SAVE_OP, SAVE_QUALITY, SAVE_SECTION,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings handle shared by the overlay and the pipeline.
pub type SharedSettings = Arc<Mutex<dyn SettingsStore + Send>>;

pub fn shared<S: SettingsStore + Send + 'static>(store: S) -> SharedSettings {
    Arc::new(Mutex::new(store))
}

/// Default location of the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snaprect")
        .join("config.json")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
struct ConfigFile {
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

#[derive(Debug)]
pub struct JsonSettings {
    path: PathBuf,
    file: ConfigFile,
}

impl JsonSettings {
    pub fn load_default() -> Self {
        Self::load(config_path())
    }

    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut file: ConfigFile = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::debug!("[CONFIG] Ignoring unreadable {}: {}", path.display(), e);
                ConfigFile::default()
            }),
            Err(e) => {
                log::debug!("[CONFIG] No config at {}: {}", path.display(), e);
                ConfigFile::default()
            }
        };

        let save = file.sections.entry(SAVE_SECTION.to_owned()).or_default();
        save.entry(SAVE_OP.to_owned())
            .or_insert_with(|| Value::from(DEFAULT_SAVE_OP));
        save.entry(SAVE_QUALITY.to_owned())
            .or_insert_with(|| Value::from(DEFAULT_SAVE_QUALITY));

        Self { path, file }
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&self.file)?;
        std::fs::write(&self.path, json)?;
        log::info!("[CONFIG] Saved {}", self.path.display());
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    fn value(&self, section: &str, key: &str) -> Option<Value> {
        self.file.sections.get(section)?.get(key).cloned()
    }

    fn set_value(&mut self, section: &str, key: &str, value: Value) {
        self.file
            .sections
            .entry(section.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
        if let Err(e) = self.save() {
            log::warn!("[CONFIG] Could not write {}: {}", self.path.display(), e);
        }
    }
}
