//! Activation
//!
//! On activation the bundle seeds its settings key with the default block
//! catalog, once. Re-activation finds the key present and leaves it
//! alone, so repeated activations never clobber a user's block toggles.

use serde_json::{json, Value as JsonValue};
use tracing::info;

use super::{SettingsError, SettingsRepository};
use crate::core::registry::BlockRegistry;

/// Settings key the block catalog is stored under.
pub const SETTINGS_KEY: &str = "ultra_blocks";

/// Outcome of an activation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The key was absent and the default catalog was written
    Seeded,
    /// The key already held a value and nothing was written
    AlreadyPresent,
}

/// Seeds the settings store from the registered block types.
pub struct Activator<'a> {
    registry: &'a BlockRegistry,
}

impl<'a> Activator<'a> {
    pub fn new(registry: &'a BlockRegistry) -> Self {
        Self { registry }
    }

    /// The catalog written on first activation: every registered block
    /// type, active, in name order.
    pub fn default_catalog(&self) -> JsonValue {
        let entries: Vec<JsonValue> = self
            .registry
            .get_all_blocks()
            .iter()
            .map(|block| {
                json!({
                    "name": block.name(),
                    "label": block.title(),
                    "active": true,
                })
            })
            .collect();
        JsonValue::Array(entries)
    }

    /// Idempotent activation: writes the default catalog only when the
    /// settings key is absent.
    pub fn activate(
        &self,
        settings: &mut dyn SettingsRepository,
    ) -> Result<ActivationOutcome, SettingsError> {
        if settings.set_if_absent(SETTINGS_KEY, self.default_catalog())? {
            info!(key = SETTINGS_KEY, "seeded default block catalog");
            Ok(ActivationOutcome::Seeded)
        } else {
            Ok(ActivationOutcome::AlreadyPresent)
        }
    }
}
