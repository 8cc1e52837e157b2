//! Block Registry - Central registry for the available block types
//!
//! This module provides a thread-safe registry for registering, discovering, and managing
//! block types in the bundle. It supports:
//! - Block type registration and unregistration
//! - Lookup by namespaced name, category, or search query
//! - Registration-time validation, including a save/reconstruct coverage
//!   probe that rejects schemas whose markup-sourced attributes would be
//!   silently lost on reload

use crate::blocks::BlockType;
use crate::core::block::BlockCategory;
use crate::core::codec;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Block registry keyed by namespaced block name
///
/// The registry uses `Arc<RwLock<HashMap>>` for thread-safe access to block
/// types. It supports concurrent reads and exclusive writes using parking_lot's
/// RwLock for better performance compared to std::sync::RwLock.
#[derive(Clone)]
pub struct BlockRegistry {
    blocks: Arc<RwLock<HashMap<String, Arc<BlockType>>>>,
}

impl BlockRegistry {
    /// Create a new empty block registry
    ///
    /// # Example
    /// ```
    /// use ultra_blocks::core::registry::BlockRegistry;
    ///
    /// let registry = BlockRegistry::new();
    /// ```
    pub fn new() -> Self {
        Self {
            blocks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry pre-loaded with every built-in block type
    ///
    /// # Returns
    /// * `Ok(BlockRegistry)` with all bundled block types registered
    /// * `Err(RegistryError)` if any built-in fails validation
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let registry = Self::new();
        for block in BlockType::all() {
            registry.register(block)?;
        }
        Ok(registry)
    }

    /// Register a block type in the registry
    ///
    /// # Arguments
    /// * `block` - The block type to register
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError)` if the name already exists or validation fails
    ///
    /// # Example
    /// ```ignore
    /// registry.register(BlockType::Spacer(SpacerBlock::new()))?;
    /// ```
    pub fn register(&self, block: BlockType) -> Result<(), RegistryError> {
        // Validate before registration
        self.validate_block(&block)?;

        let name = block.name().to_string();
        let mut blocks = self.blocks.write();

        if blocks.contains_key(&name) {
            return Err(RegistryError::DuplicateBlock(name));
        }

        debug!(name = %name, "registered block type");
        blocks.insert(name, Arc::new(block));
        Ok(())
    }

    /// Unregister a block type from the registry
    ///
    /// # Arguments
    /// * `name` - The namespaced name of the block type to unregister
    ///
    /// # Returns
    /// * `Ok(())` if unregistration succeeds
    /// * `Err(RegistryError)` if the block type is not found
    pub fn unregister(&self, name: &str) -> Result<(), RegistryError> {
        let mut blocks = self.blocks.write();

        blocks
            .remove(name)
            .ok_or_else(|| RegistryError::BlockNotFound(name.to_string()))?;

        debug!(name = %name, "unregistered block type");
        Ok(())
    }

    /// Get a block type by its namespaced name
    ///
    /// # Arguments
    /// * `name` - The name to look up, e.g. `ub/testimonial-block`
    ///
    /// # Returns
    /// * `Ok(Arc<BlockType>)` if the block type is found
    /// * `Err(RegistryError)` if the block type is not found
    pub fn get_block(&self, name: &str) -> Result<Arc<BlockType>, RegistryError> {
        let blocks = self.blocks.read();

        blocks
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::BlockNotFound(name.to_string()))
    }

    /// Get all registered block types, sorted by name
    ///
    /// # Returns
    /// A vector containing all registered block types in name order
    pub fn get_all_blocks(&self) -> Vec<Arc<BlockType>> {
        let blocks = self.blocks.read();
        let mut all: Vec<_> = blocks.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Get block types filtered by category
    ///
    /// # Arguments
    /// * `category` - The category to filter by
    ///
    /// # Returns
    /// A vector containing all block types in the given category, in name order
    pub fn get_blocks_by_category(&self, category: BlockCategory) -> Vec<Arc<BlockType>> {
        self.get_all_blocks()
            .into_iter()
            .filter(|b| b.metadata().category == category)
            .collect()
    }

    /// Search for block types by query string
    ///
    /// Searches in block name, title, and keywords.
    ///
    /// # Arguments
    /// * `query` - The search query (case-insensitive)
    ///
    /// # Returns
    /// A vector containing all block types matching the search query
    pub fn search_blocks(&self, query: &str) -> Vec<Arc<BlockType>> {
        let query = query.to_lowercase();

        self.get_all_blocks()
            .into_iter()
            .filter(|b| {
                let meta = b.metadata();
                meta.name.to_lowercase().contains(&query)
                    || meta.title.to_lowercase().contains(&query)
                    || meta
                        .keywords
                        .iter()
                        .any(|keyword| keyword.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Get the number of registered block types
    pub fn count(&self) -> usize {
        let blocks = self.blocks.read();
        blocks.len()
    }

    /// Check if a block type with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        let blocks = self.blocks.read();
        blocks.contains_key(name)
    }

    /// Clear all registered block types
    pub fn clear(&self) {
        let mut blocks = self.blocks.write();
        blocks.clear();
    }

    /// Validate a block type before registration
    ///
    /// Checks the metadata, then renders the schema's sample attributes
    /// through `save` and verifies every markup-sourced attribute reads
    /// back out of the result.
    fn validate_block(&self, block: &BlockType) -> Result<(), RegistryError> {
        let meta = block.metadata();

        if meta.name.is_empty() {
            return Err(RegistryError::ValidationError(
                "block name cannot be empty".into(),
            ));
        }

        if !meta.name.contains('/') {
            return Err(RegistryError::ValidationError(format!(
                "block name '{}' must be namespaced, e.g. ub/spacer",
                meta.name
            )));
        }

        if meta.title.is_empty() {
            return Err(RegistryError::ValidationError(
                "block title cannot be empty".into(),
            ));
        }

        let schema = block.schema();
        let probe = block.save(&codec::sample_attributes(schema));
        let coverage = codec::verify_coverage(schema, &probe);
        if coverage.has_errors() {
            return Err(RegistryError::ValidationError(coverage.errors.join("; ")));
        }

        Ok(())
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Block type with given name was not found
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// Attempted to register a block type under a name already taken
    #[error("Duplicate block name: {0}")]
    DuplicateBlock(String),

    /// Block type validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),
}
