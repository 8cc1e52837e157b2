//! Ultra Blocks - Block bundle for the Gutenberg-style editor
//!
//! This crate provides a bundle of custom content blocks, including the
//! attribute and markup model, the per-type edit/save rendering, an
//! editing session over block instances, and idempotent activation
//! against a host settings store.

pub mod blocks;
pub mod core;
pub mod editor;
pub mod settings;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use blocks::BlockType;
pub use core::{AttributeSet, AttributeUpdate, BlockRegistry, MarkupNode};
pub use editor::EditorSession;
pub use settings::{Activator, SettingsRepository};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
