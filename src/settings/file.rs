//! File-backed settings store
//!
//! Settings live in a single JSON object on disk. The file is read in
//! full on every access and rewritten in full on every write; settings
//! traffic is tiny and the format stays inspectable with any text editor.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;

use super::{SettingsError, SettingsRepository};

/// Settings store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    /// Open a settings store at `path`. A missing file reads as empty and
    /// is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, JsonValue>, SettingsError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &HashMap<String, JsonValue>) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SettingsRepository for FileSettings {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, SettingsError> {
        let mut values = self.read_all()?;
        Ok(values.remove(key))
    }

    fn set_if_absent(&mut self, key: &str, value: JsonValue) -> Result<bool, SettingsError> {
        let mut values = self.read_all()?;
        if values.contains_key(key) {
            return Ok(false);
        }
        values.insert(key.to_string(), value);
        self.write_all(&values)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FileSettings::new(dir.path().join("settings.json"));
        assert_eq!(settings.get("anything").unwrap(), None);
    }

    #[test]
    fn test_set_if_absent_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = FileSettings::new(dir.path().join("settings.json"));

        assert!(settings.set_if_absent("k", json!({"a": 1})).unwrap());
        assert_eq!(settings.get("k").unwrap(), Some(json!({"a": 1})));
        assert!(!settings.set_if_absent("k", json!({"a": 2})).unwrap());
        assert_eq!(settings.get("k").unwrap(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_values_persist_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut first = FileSettings::new(&path);
        first.set_if_absent("k", json!("v")).unwrap();

        let second = FileSettings::new(&path);
        assert_eq!(second.get("k").unwrap(), Some(json!("v")));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let settings = FileSettings::new(&path);
        assert!(matches!(
            settings.get("k").unwrap_err(),
            SettingsError::Serialization(_)
        ));
    }
}
