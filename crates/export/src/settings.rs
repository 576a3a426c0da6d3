//! Key/value settings used while saving

use serde_json::Value;
use std::collections::BTreeMap;

pub const SAVE_SECTION: &str = "save";
pub const SAVE_OP: &str = "save_op";
pub const SAVE_QUALITY: &str = "save_quality";
pub const COMMON_SECTION: &str = "common";
pub const DEFAULT_SAVEPATH: &str = "default_savepath";

/// Marker stored in `common.default_savepath` after a clipboard save.
pub const CLIPBOARD_MARKER: &str = "clipboard";

pub const DEFAULT_SAVE_OP: i64 = 0;
pub const DEFAULT_SAVE_QUALITY: i64 = 100;

/// Sectioned settings store.
pub trait SettingsStore {
    fn value(&self, section: &str, key: &str) -> Option<Value>;
    fn set_value(&mut self, section: &str, key: &str, value: Value);

    fn save_op(&self) -> i64 {
        self.value(SAVE_SECTION, SAVE_OP)
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_SAVE_OP)
    }

    fn save_quality(&self) -> i64 {
        self.value(SAVE_SECTION, SAVE_QUALITY)
            .and_then(|v| v.as_i64())
            .unwrap_or(DEFAULT_SAVE_QUALITY)
    }

    /// Empty when unset.
    fn default_savepath(&self) -> String {
        self.value(COMMON_SECTION, DEFAULT_SAVEPATH)
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default()
    }

    fn set_default_savepath(&mut self, path: &str) {
        self.set_value(COMMON_SECTION, DEFAULT_SAVEPATH, Value::from(path));
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn value(&self, section: &str, key: &str) -> Option<Value> {
        self.sections.get(section)?.get(key).cloned()
    }

    fn set_value(&mut self, section: &str, key: &str, value: Value) {
        self.sections
            .entry(section.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let settings = MemorySettings::new();
        assert_eq!(settings.save_op(), 0);
        assert_eq!(settings.save_quality(), 100);
        assert_eq!(settings.default_savepath(), "");
    }

    #[test]
    fn values_round_trip_by_section() {
        let mut settings = MemorySettings::new();
        settings.set_value(SAVE_SECTION, SAVE_OP, Value::from(3));
        settings.set_default_savepath("/tmp/shots");
        assert_eq!(settings.save_op(), 3);
        assert_eq!(settings.default_savepath(), "/tmp/shots");
        assert!(settings.value(COMMON_SECTION, SAVE_OP).is_none());
    }
}
