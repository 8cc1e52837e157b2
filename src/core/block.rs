//! Shared block contract types
//!
//! This module defines the descriptive metadata every block type declares
//! and the ephemeral edit state passed into edit-time renders.

use serde::{Deserialize, Serialize};

/// Descriptive metadata of one block type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Registered identifier, namespaced (`ub/testimonial-block`)
    pub name: String,
    /// Human-readable title shown in the inserter
    pub title: String,
    /// Category the inserter lists the block under
    pub category: BlockCategory,
    /// Icon identifier
    pub icon: String,
    /// Search keywords, at most three by editor convention
    pub keywords: Vec<String>,
}

impl BlockMetadata {
    /// Create metadata with no icon or keywords
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        category: BlockCategory,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            category,
            icon: String::new(),
            keywords: Vec::new(),
        }
    }

    /// Set the icon identifier
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the search keywords
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }
}

/// Block category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    /// Everyday content blocks
    Common,
    /// Text presentation blocks
    Formatting,
    /// Structural and spacing blocks
    Layout,
    /// Self-contained widget blocks
    Widgets,
    /// External content embeds
    Embed,
}

impl BlockCategory {
    /// Get a human-readable name for the category
    pub fn display_name(&self) -> &str {
        match self {
            BlockCategory::Common => "Common Blocks",
            BlockCategory::Formatting => "Formatting",
            BlockCategory::Layout => "Layout Elements",
            BlockCategory::Widgets => "Widgets",
            BlockCategory::Embed => "Embeds",
        }
    }

    /// The category slug used in serialized metadata
    pub fn slug(&self) -> &str {
        match self {
            BlockCategory::Common => "common",
            BlockCategory::Formatting => "formatting",
            BlockCategory::Layout => "layout",
            BlockCategory::Widgets => "widgets",
            BlockCategory::Embed => "embed",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ephemeral edit-time state of one block instance.
///
/// Holds the selection flag and the single "active editable sub-field"
/// key that routes focus-driven editing affordances between a block's
/// text fields. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    /// Whether the block instance is currently selected
    pub is_selected: bool,
    /// Key of the sub-field receiving editing focus, if any
    pub active_field: Option<String>,
}

impl EditState {
    /// State for a selected instance with no focused sub-field
    pub fn selected() -> Self {
        Self {
            is_selected: true,
            active_field: None,
        }
    }

    /// Set the focused sub-field (builder style)
    pub fn with_active_field(mut self, field: impl Into<String>) -> Self {
        self.active_field = Some(field.into());
        self
    }
}
