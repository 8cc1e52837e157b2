//! Built-in block types
//!
//! One file per block type, plus [`BlockType`], the closed set the
//! registry serves. Each variant owns its metadata and attribute schema
//! and exposes the two pure rendering functions:
//!
//! - `edit` maps attributes and editor state to a control tree
//! - `save` maps attributes to the markup that is persisted
//!
//! Everything a block writes into its save output under a codec rule can
//! be read back by [`crate::core::codec::reconstruct`]; anything else is
//! gone once the session ends.

pub mod call_to_action;
pub mod divider;
pub mod notification_box;
pub mod spacer;
pub mod testimonial;

pub use call_to_action::CallToActionBlock;
pub use divider::DividerBlock;
pub use notification_box::NotificationBoxBlock;
pub use spacer::SpacerBlock;
pub use testimonial::TestimonialBlock;

pub use crate::core::block::BlockCategory;

use crate::core::attribute::{AttributeSchema, AttributeSet, AttributeValue};
use crate::core::block::{BlockMetadata, EditState};
use crate::core::markup::MarkupNode;
use crate::editor::media::ImageBinding;
use crate::editor::view::EditView;

// ---------------------------------------------------------------------------
// BlockType
// ---------------------------------------------------------------------------

/// The closed set of block types this bundle ships.
#[derive(Debug, Clone)]
pub enum BlockType {
    /// Severity-classed callout box
    NotificationBox(NotificationBoxBlock),
    /// Quote card with portrait and author sign-off
    Testimonial(TestimonialBlock),
    /// Headline, copy, and link button
    CallToAction(CallToActionBlock),
    /// Styled horizontal rule
    Divider(DividerBlock),
    /// Fixed-height vertical gap
    Spacer(SpacerBlock),
}

impl BlockType {
    /// Every built-in block type, in bundle order.
    pub fn all() -> Vec<BlockType> {
        vec![
            BlockType::NotificationBox(NotificationBoxBlock::new()),
            BlockType::Testimonial(TestimonialBlock::new()),
            BlockType::CallToAction(CallToActionBlock::new()),
            BlockType::Divider(DividerBlock::new()),
            BlockType::Spacer(SpacerBlock::new()),
        ]
    }

    pub fn metadata(&self) -> &BlockMetadata {
        match self {
            BlockType::NotificationBox(b) => b.metadata(),
            BlockType::Testimonial(b) => b.metadata(),
            BlockType::CallToAction(b) => b.metadata(),
            BlockType::Divider(b) => b.metadata(),
            BlockType::Spacer(b) => b.metadata(),
        }
    }

    pub fn schema(&self) -> &AttributeSchema {
        match self {
            BlockType::NotificationBox(b) => b.schema(),
            BlockType::Testimonial(b) => b.schema(),
            BlockType::CallToAction(b) => b.schema(),
            BlockType::Divider(b) => b.schema(),
            BlockType::Spacer(b) => b.schema(),
        }
    }

    /// Namespaced identifier, e.g. `ub/testimonial-block`.
    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    /// Human-readable title shown in the inserter.
    pub fn title(&self) -> &str {
        &self.metadata().title
    }

    pub fn edit(&self, attrs: &AttributeSet, state: &EditState) -> EditView {
        match self {
            BlockType::NotificationBox(b) => b.edit(attrs, state),
            BlockType::Testimonial(b) => b.edit(attrs, state),
            BlockType::CallToAction(b) => b.edit(attrs, state),
            BlockType::Divider(b) => b.edit(attrs, state),
            BlockType::Spacer(b) => b.edit(attrs, state),
        }
    }

    pub fn save(&self, attrs: &AttributeSet) -> MarkupNode {
        match self {
            BlockType::NotificationBox(b) => b.save(attrs),
            BlockType::Testimonial(b) => b.save(attrs),
            BlockType::CallToAction(b) => b.save(attrs),
            BlockType::Divider(b) => b.save(attrs),
            BlockType::Spacer(b) => b.save(attrs),
        }
    }

    /// The image attachment binding, for block types with an image slot.
    pub fn image_binding(&self) -> Option<ImageBinding> {
        match self {
            BlockType::Testimonial(_) => Some(TestimonialBlock::image_binding()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute helpers
// ---------------------------------------------------------------------------

/// Resolved rich-text value, empty when unset or of another type.
pub(crate) fn rich_attr(
    schema: &AttributeSchema,
    attrs: &AttributeSet,
    name: &str,
) -> Vec<MarkupNode> {
    match attrs.resolve(schema, name) {
        AttributeValue::RichText(nodes) => nodes,
        _ => Vec::new(),
    }
}

/// Resolved string value, empty when unset or of another type.
pub(crate) fn str_attr(schema: &AttributeSchema, attrs: &AttributeSet, name: &str) -> String {
    match attrs.resolve(schema, name) {
        AttributeValue::String(value) => value,
        _ => String::new(),
    }
}

/// Resolved integer value, zero when unset or of another type.
pub(crate) fn int_attr(schema: &AttributeSchema, attrs: &AttributeSet, name: &str) -> i64 {
    attrs.resolve(schema, name).as_integer().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_names_are_unique_and_namespaced() {
        let blocks = BlockType::all();
        assert_eq!(blocks.len(), 5);

        let mut names: Vec<&str> = blocks.iter().map(|b| b.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
        assert!(names.iter().all(|n| n.starts_with("ub/")));
    }

    #[test]
    fn test_only_testimonial_binds_an_image() {
        for block in BlockType::all() {
            let expected = block.name() == "ub/testimonial-block";
            assert_eq!(block.image_binding().is_some(), expected, "{}", block.name());
        }
    }

    #[test]
    fn test_every_block_saves_from_defaults() {
        for block in BlockType::all() {
            let markup = block.save(&block.schema().defaults());
            assert!(markup.is_element(), "{}", block.name());
            assert!(!markup.to_html().is_empty(), "{}", block.name());
        }
    }

    #[test]
    fn test_every_edit_view_has_a_body() {
        for block in BlockType::all() {
            let view = block.edit(&block.schema().defaults(), &EditState::selected());
            assert!(matches!(view.body, crate::editor::view::EditNode::Element { .. }));
        }
    }
}
