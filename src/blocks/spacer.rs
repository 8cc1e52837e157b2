//! Spacer Block
//!
//! Vertical whitespace of a chosen height. Like the divider, it carries
//! only session attributes and saves to a single styled wrapper.

use crate::core::attribute::{AttributeDescriptor, AttributeSchema, AttributeSet, AttributeType};
use crate::core::block::{BlockCategory, BlockMetadata, EditState};
use crate::core::markup::{inline_style, px, MarkupNode};
use crate::editor::view::{EditNode, EditView, InspectorControl, InspectorPanel};

use super::int_attr;

// ---------------------------------------------------------------------------
// SpacerBlock
// ---------------------------------------------------------------------------

/// Spacer block: fixed-height gap.
#[derive(Debug, Clone)]
pub struct SpacerBlock {
    metadata: BlockMetadata,
    schema: AttributeSchema,
}

impl SpacerBlock {
    pub fn new() -> Self {
        Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema(),
        }
    }

    // -- Definition builders -------------------------------------------------

    fn build_metadata() -> BlockMetadata {
        BlockMetadata::new("ub/spacer", "Spacer", BlockCategory::Layout)
            .with_icon("image-flip-vertical")
            .with_keywords(&["spacer", "gap", "Ultra Blocks"])
    }

    fn build_schema() -> AttributeSchema {
        AttributeSchema::new()
            .with(AttributeDescriptor::new("spacerHeight", AttributeType::Number).with_default(30))
    }

    // -- Accessors -----------------------------------------------------------

    pub fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    // -- Rendering -----------------------------------------------------------

    pub fn edit(&self, attrs: &AttributeSet, state: &EditState) -> EditView {
        let body = EditNode::element("div")
            .with_class("ub_spacer")
            .with_attr("style", self.gap_style(attrs));

        let inspector = if state.is_selected {
            vec![InspectorPanel::new("Spacer Settings")
                .open_by_default()
                .with_control(InspectorControl::RangeSlider {
                    label: "Height".to_string(),
                    attribute: "spacerHeight".to_string(),
                    value: int_attr(&self.schema, attrs, "spacerHeight"),
                    min: 10,
                    max: 600,
                    allow_reset: true,
                })]
        } else {
            Vec::new()
        };

        EditView { inspector, body }
    }

    pub fn save(&self, attrs: &AttributeSet) -> MarkupNode {
        MarkupNode::element("div")
            .with_class("ub_spacer")
            .with_attr("style", self.gap_style(attrs))
    }

    // -- Style helpers -------------------------------------------------------

    fn gap_style(&self, attrs: &AttributeSet) -> String {
        inline_style(&[("height", px(int_attr(&self.schema, attrs, "spacerHeight")))])
    }
}

impl Default for SpacerBlock {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> SpacerBlock {
        SpacerBlock::new()
    }

    #[test]
    fn test_save_with_defaults() {
        let markup = block().save(&block().schema().defaults());
        assert_eq!(markup.attr("style"), Some("height: 30px"));
    }

    #[test]
    fn test_save_follows_height() {
        let mut attrs = block().schema().defaults();
        attrs.set("spacerHeight", 120i64);
        let markup = block().save(&attrs);
        assert_eq!(markup.attr("style"), Some("height: 120px"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let b = block();
        let attrs = b.schema().defaults();
        assert_eq!(b.save(&attrs).to_html(), b.save(&attrs).to_html());
    }
}
