//! Divider Block
//!
//! A horizontal rule drawn as a styled top border. Everything about it is
//! a session attribute; the saved markup is a single styled wrapper with
//! no readable children, so reconstruction yields the catalog defaults.

use crate::core::attribute::{AttributeDescriptor, AttributeSchema, AttributeSet, AttributeType};
use crate::core::block::{BlockCategory, BlockMetadata, EditState};
use crate::core::markup::{inline_style, px, MarkupNode};
use crate::editor::view::{EditNode, EditView, InspectorControl, InspectorPanel, SelectOption};

use super::{int_attr, str_attr};

// ---------------------------------------------------------------------------
// DividerBlock
// ---------------------------------------------------------------------------

/// Divider block: styled horizontal rule.
#[derive(Debug, Clone)]
pub struct DividerBlock {
    metadata: BlockMetadata,
    schema: AttributeSchema,
}

impl DividerBlock {
    pub fn new() -> Self {
        Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema(),
        }
    }

    // -- Definition builders -------------------------------------------------

    fn build_metadata() -> BlockMetadata {
        BlockMetadata::new("ub/divider", "Divider", BlockCategory::Layout)
            .with_icon("minus")
            .with_keywords(&["divider", "separator", "Ultra Blocks"])
    }

    fn build_schema() -> AttributeSchema {
        AttributeSchema::new()
            .with(AttributeDescriptor::new("borderSize", AttributeType::Number).with_default(2))
            .with(
                AttributeDescriptor::new("borderStyle", AttributeType::String)
                    .with_default("solid"),
            )
            .with(
                AttributeDescriptor::new("borderColor", AttributeType::String)
                    .with_default("#ccc"),
            )
            .with(AttributeDescriptor::new("borderHeight", AttributeType::Number).with_default(20))
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
        let schema = &self.schema;

        let body = EditNode::element("div")
            .with_class("ub_divider")
            .with_attr("style", self.rule_style(attrs));

        let inspector = if state.is_selected {
            vec![InspectorPanel::new("Divider Settings")
                .open_by_default()
                .with_control(InspectorControl::RangeSlider {
                    label: "Thickness".to_string(),
                    attribute: "borderSize".to_string(),
                    value: int_attr(schema, attrs, "borderSize"),
                    min: 1,
                    max: 20,
                    allow_reset: true,
                })
                .with_control(InspectorControl::Select {
                    label: "Style".to_string(),
                    attribute: "borderStyle".to_string(),
                    value: str_attr(schema, attrs, "borderStyle"),
                    options: vec![
                        SelectOption::new("solid", "Solid"),
                        SelectOption::new("dashed", "Dashed"),
                        SelectOption::new("dotted", "Dotted"),
                    ],
                })
                .with_control(InspectorControl::ColorPalette {
                    label: "Color".to_string(),
                    attribute: "borderColor".to_string(),
                    value: Some(str_attr(schema, attrs, "borderColor")),
                    allow_reset: true,
                })
                .with_control(InspectorControl::RangeSlider {
                    label: "Height".to_string(),
                    attribute: "borderHeight".to_string(),
                    value: int_attr(schema, attrs, "borderHeight"),
                    min: 10,
                    max: 200,
                    allow_reset: true,
                })]
        } else {
            Vec::new()
        };

        EditView { inspector, body }
    }

    pub fn save(&self, attrs: &AttributeSet) -> MarkupNode {
        MarkupNode::element("div")
            .with_class("ub_divider")
            .with_attr("style", self.rule_style(attrs))
    }

    // -- Style helpers -------------------------------------------------------

    fn rule_style(&self, attrs: &AttributeSet) -> String {
        let schema = &self.schema;
        let border = format!(
            "{} {} {}",
            px(int_attr(schema, attrs, "borderSize")),
            str_attr(schema, attrs, "borderStyle"),
            str_attr(schema, attrs, "borderColor"),
        );
        let margin = px(int_attr(schema, attrs, "borderHeight"));
        inline_style(&[
            ("border-top", border),
            ("margin-top", margin.clone()),
            ("margin-bottom", margin),
        ])
    }
}

impl Default for DividerBlock {
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

    fn block() -> DividerBlock {
        DividerBlock::new()
    }

    #[test]
    fn test_save_with_defaults() {
        let markup = block().save(&block().schema().defaults());
        assert_eq!(
            markup.attr("style"),
            Some("border-top: 2px solid #ccc; margin-top: 20px; margin-bottom: 20px")
        );
    }

    #[test]
    fn test_save_follows_attributes() {
        let mut attrs = block().schema().defaults();
        attrs.set("borderSize", 5i64);
        attrs.set("borderStyle", "dashed");
        attrs.set("borderColor", "#ff0000");
        attrs.set("borderHeight", 40i64);

        let markup = block().save(&attrs);
        assert_eq!(
            markup.attr("style"),
            Some("border-top: 5px dashed #ff0000; margin-top: 40px; margin-bottom: 40px")
        );
    }

    #[test]
    fn test_no_markup_sourced_attributes() {
        assert_eq!(block().schema().markup_sourced().count(), 0);
    }

    #[test]
    fn test_inspector_controls() {
        let view = block().edit(&block().schema().defaults(), &EditState::selected());
        assert_eq!(view.inspector.len(), 1);
        assert_eq!(view.inspector[0].controls.len(), 4);
    }
}
