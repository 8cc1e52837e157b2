//! Editor session
//!
//! Holds the working document: an ordered list of block instances backed
//! by a registry of block types. All mutation goes through the session,
//! which applies partial attribute updates, routes image selection through
//! the owning block type's binding, and renders edit views and saved
//! markup on demand.
//!
//! Sessions follow the host editor's single-writer model; nothing here
//! mutates concurrently.

use std::sync::Arc;

use tracing::debug;

use crate::blocks::BlockType;
use crate::core::attribute::{AttributeSet, AttributeUpdate};
use crate::core::codec;
use crate::core::markup::MarkupNode;
use crate::core::registry::BlockRegistry;
use crate::editor::instance::{BlockInstance, InstanceId};
use crate::editor::media::MediaAttachment;
use crate::editor::view::EditView;

// ── Errors ──────────────────────────────────────────────────────────────────

/// Editor session error types
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The named block type is not registered
    #[error("Unknown block type: {0}")]
    UnknownBlock(String),

    /// No instance with the given ID exists in this session
    #[error("No such block instance: {0}")]
    InstanceNotFound(InstanceId),

    /// The instance's block type has no image slot
    #[error("Block type '{0}' has no image slot")]
    ImageNotSupported(String),
}

// ── Session ─────────────────────────────────────────────────────────────────

/// An editing session over an ordered document of block instances.
pub struct EditorSession {
    registry: Arc<BlockRegistry>,
    instances: Vec<BlockInstance>,
}

impl EditorSession {
    /// Create an empty session over the given registry.
    pub fn new(registry: Arc<BlockRegistry>) -> Self {
        Self {
            registry,
            instances: Vec::new(),
        }
    }

    /// The registry this session resolves block types against.
    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// All instances in document order.
    pub fn instances(&self) -> &[BlockInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Insert a new instance of the named block type at the end of the
    /// document, with its schema defaults applied.
    pub fn insert_block(&mut self, block_name: &str) -> Result<InstanceId, EditorError> {
        let block = self.block_type(block_name)?;
        let instance = BlockInstance::new(block_name, block.schema().defaults());
        let id = instance.id;
        self.instances.push(instance);
        debug!(block = block_name, %id, "inserted block instance");
        Ok(id)
    }

    /// Re-create an instance from saved markup, as a reload does. Only
    /// markup-sourced attributes survive; everything else falls back to
    /// schema defaults at render time.
    pub fn load_block(
        &mut self,
        block_name: &str,
        markup: &MarkupNode,
    ) -> Result<InstanceId, EditorError> {
        let block = self.block_type(block_name)?;
        let attributes = codec::reconstruct(block.schema(), markup);
        let instance = BlockInstance::new(block_name, attributes);
        let id = instance.id;
        self.instances.push(instance);
        debug!(block = block_name, %id, "loaded block instance from markup");
        Ok(id)
    }

    /// Remove an instance from the document.
    pub fn remove_block(&mut self, id: InstanceId) -> Result<(), EditorError> {
        let index = self
            .instances
            .iter()
            .position(|instance| instance.id == id)
            .ok_or(EditorError::InstanceNotFound(id))?;
        self.instances.remove(index);
        debug!(%id, "removed block instance");
        Ok(())
    }

    /// Look up an instance by ID.
    pub fn instance(&self, id: InstanceId) -> Result<&BlockInstance, EditorError> {
        self.instances
            .iter()
            .find(|instance| instance.id == id)
            .ok_or(EditorError::InstanceNotFound(id))
    }

    /// Apply a partial attribute update to an instance. Attributes not
    /// named in the update keep their values.
    pub fn update_attributes(
        &mut self,
        id: InstanceId,
        update: AttributeUpdate,
    ) -> Result<(), EditorError> {
        let instance = self.instance_mut(id)?;
        instance.attributes.apply(update);
        Ok(())
    }

    /// Select or deselect an instance. Selecting one deselects the rest,
    /// matching the host editor's single-selection model.
    pub fn set_selected(&mut self, id: InstanceId, selected: bool) -> Result<(), EditorError> {
        // Verify first so a bad ID leaves selection untouched.
        self.instance(id)?;

        for instance in &mut self.instances {
            if instance.id == id {
                instance.state.is_selected = selected;
                if !selected {
                    instance.state.active_field = None;
                }
            } else if selected {
                instance.state.is_selected = false;
                instance.state.active_field = None;
            }
        }
        Ok(())
    }

    /// Mark which editable field of an instance has the caret.
    pub fn set_active_field(
        &mut self,
        id: InstanceId,
        field: Option<String>,
    ) -> Result<(), EditorError> {
        let instance = self.instance_mut(id)?;
        instance.state.active_field = field;
        Ok(())
    }

    /// Apply a media selection through the block type's image binding.
    /// Sets the identifier, URL, and alt text together.
    pub fn select_image(
        &mut self,
        id: InstanceId,
        attachment: &MediaAttachment,
    ) -> Result<(), EditorError> {
        let binding = self.image_binding(id)?;
        let instance = self.instance_mut(id)?;
        instance.attributes.apply(binding.select(attachment));
        debug!(%id, attachment_id = attachment.id, "selected image");
        Ok(())
    }

    /// Clear an instance's image attributes together.
    pub fn remove_image(&mut self, id: InstanceId) -> Result<(), EditorError> {
        let binding = self.image_binding(id)?;
        let instance = self.instance_mut(id)?;
        instance.attributes.apply(binding.clear());
        debug!(%id, "removed image");
        Ok(())
    }

    /// Render the edit-time view of an instance.
    pub fn edit_view(&self, id: InstanceId) -> Result<EditView, EditorError> {
        let instance = self.instance(id)?;
        let block = self.block_type(&instance.block_name)?;
        Ok(block.edit(&instance.attributes, &instance.state))
    }

    /// Render the persisted markup of an instance.
    pub fn save_block(&self, id: InstanceId) -> Result<MarkupNode, EditorError> {
        let instance = self.instance(id)?;
        let block = self.block_type(&instance.block_name)?;
        Ok(block.save(&instance.attributes))
    }

    /// Serialize the whole document, one block per line, in document order.
    pub fn render_document(&self) -> Result<String, EditorError> {
        let mut lines = Vec::with_capacity(self.instances.len());
        for instance in &self.instances {
            let block = self.block_type(&instance.block_name)?;
            lines.push(block.save(&instance.attributes).to_html());
        }
        Ok(lines.join("\n"))
    }

    /// Rebuild the attribute values a saved block's markup encodes.
    pub fn reconstruct(
        &self,
        block_name: &str,
        markup: &MarkupNode,
    ) -> Result<AttributeSet, EditorError> {
        let block = self.block_type(block_name)?;
        Ok(codec::reconstruct(block.schema(), markup))
    }

    // ── Internal lookups ────────────────────────────────────────────────────

    fn instance_mut(&mut self, id: InstanceId) -> Result<&mut BlockInstance, EditorError> {
        self.instances
            .iter_mut()
            .find(|instance| instance.id == id)
            .ok_or(EditorError::InstanceNotFound(id))
    }

    fn block_type(&self, name: &str) -> Result<Arc<BlockType>, EditorError> {
        self.registry
            .get_block(name)
            .map_err(|_| EditorError::UnknownBlock(name.to_string()))
    }

    fn image_binding(
        &self,
        id: InstanceId,
    ) -> Result<crate::editor::media::ImageBinding, EditorError> {
        let instance = self.instance(id)?;
        let block = self.block_type(&instance.block_name)?;
        block
            .image_binding()
            .ok_or_else(|| EditorError::ImageNotSupported(block.name().to_string()))
    }
}
