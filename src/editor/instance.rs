//! Block instances
//!
//! A block instance is one placed block in a document: a reference to its
//! block type by name, the attribute values the user has set, and the
//! per-instance editor state.

use crate::core::attribute::AttributeSet;
use crate::core::block::EditState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a placed block instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    /// Generate a new random instance ID
    pub fn new() -> Self {
        InstanceId(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One placed block in a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Identifier of this placement
    pub id: InstanceId,
    /// Namespaced name of the block type, e.g. `ub/divider`
    pub block_name: String,
    /// Explicitly set attribute values; defaults come from the schema
    pub attributes: AttributeSet,
    /// Editor-session state, never persisted into markup
    #[serde(skip)]
    pub state: EditState,
}

impl BlockInstance {
    /// Create an instance of the named block type with the given attributes.
    pub fn new(block_name: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            id: InstanceId::new(),
            block_name: block_name.into(),
            attributes,
            state: EditState::default(),
        }
    }
}
