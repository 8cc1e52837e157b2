//! Persisted settings
//!
//! The host stores plugin settings in a keyed option store. The
//! [`SettingsRepository`] trait abstracts that store so activation logic
//! runs against in-memory settings in tests and file-backed settings in a
//! real install.

pub mod activation;
pub mod file;

pub use activation::{ActivationOutcome, Activator, SETTINGS_KEY};
pub use file::FileSettings;

use std::collections::HashMap;

use serde_json::Value as JsonValue;

/// Keyed settings store with write-once semantics for seeding.
pub trait SettingsRepository {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<JsonValue>, SettingsError>;

    /// Store `value` under `key` only when the key is absent. Returns
    /// whether a write happened.
    fn set_if_absent(&mut self, key: &str, value: JsonValue) -> Result<bool, SettingsError>;
}

/// Settings store error types
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Underlying storage could not be read or written
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored content is not valid JSON
    #[error("Settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// In-memory settings store, for tests and the wasm host shim.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettings {
    values: HashMap<String, JsonValue>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsRepository for InMemorySettings {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, SettingsError> {
        Ok(self.values.get(key).cloned())
    }

    fn set_if_absent(&mut self, key: &str, value: JsonValue) -> Result<bool, SettingsError> {
        if self.values.contains_key(key) {
            return Ok(false);
        }
        self.values.insert(key.to_string(), value);
        Ok(true)
    }
}
