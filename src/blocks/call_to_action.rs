//! Call To Action Block
//!
//! A conversion box: headline, supporting copy, and a wide link button.
//! The three text regions are markup-sourced rich text; the button link
//! is stored on the anchor itself so it survives reloads. All sizing and
//! color knobs are session attributes with catalog defaults.
//!
//! ## Attributes
//!
//! | Attribute | Type | Source |
//! |-----------|------|--------|
//! | `ub_call_to_action_headline_text` | rich text | children of `.ub_call_to_action_headline_text` |
//! | `ub_cta_content_text` | rich text | children of `.ub_cta_content_text` |
//! | `ub_cta_button_text` | rich text | children of `.ub_cta_button_text` |
//! | `url` | string | `href` of `a` |
//! | `headFontSize` | number | none, default `30` |
//! | `headColor` | string | none, default `#444444` |
//! | `contentFontSize` | number | none, default `15` |
//! | `contentColor` | string | none, default `#444444` |
//! | `buttonWidth` | number | none, default `250` |
//! | `buttonFontSize` | number | none, default `14` |
//! | `buttonColor` | string | none, default `#E27330` |
//! | `buttonTextColor` | string | none, default `#ffffff` |

use crate::core::attribute::{
    AttributeDescriptor, AttributeSchema, AttributeSet, AttributeSource, AttributeType,
};
use crate::core::block::{BlockCategory, BlockMetadata, EditState};
use crate::core::codec;
use crate::core::markup::{inline_style, px, MarkupNode, Selector};
use crate::editor::view::{EditNode, EditView, InspectorControl, InspectorPanel, RichTextField};

use super::{int_attr, rich_attr, str_attr};

// ---------------------------------------------------------------------------
// CallToActionBlock
// ---------------------------------------------------------------------------

/// Call-to-action block: headline, copy, link button.
#[derive(Debug, Clone)]
pub struct CallToActionBlock {
    metadata: BlockMetadata,
    schema: AttributeSchema,
}

impl CallToActionBlock {
    pub fn new() -> Self {
        Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema(),
        }
    }

    // -- Definition builders -------------------------------------------------

    fn build_metadata() -> BlockMetadata {
        BlockMetadata::new("ub/call-to-action", "Call To Action", BlockCategory::Common)
            .with_icon("megaphone")
            .with_keywords(&["call to action", "cta", "Ultra Blocks"])
    }

    fn build_schema() -> AttributeSchema {
        AttributeSchema::new()
            .with(
                AttributeDescriptor::new(
                    "ub_call_to_action_headline_text",
                    AttributeType::RichText,
                )
                .with_source(AttributeSource::children(Selector::class(
                    "ub_call_to_action_headline_text",
                ))),
            )
            .with(
                AttributeDescriptor::new("ub_cta_content_text", AttributeType::RichText)
                    .with_source(AttributeSource::children(Selector::class(
                        "ub_cta_content_text",
                    ))),
            )
            .with(
                AttributeDescriptor::new("ub_cta_button_text", AttributeType::RichText)
                    .with_source(AttributeSource::children(Selector::class(
                        "ub_cta_button_text",
                    ))),
            )
            .with(
                AttributeDescriptor::new("url", AttributeType::String)
                    .with_source(AttributeSource::attribute(Selector::tag("a"), "href")),
            )
            .with(AttributeDescriptor::new("headFontSize", AttributeType::Number).with_default(30))
            .with(
                AttributeDescriptor::new("headColor", AttributeType::String)
                    .with_default("#444444"),
            )
            .with(
                AttributeDescriptor::new("contentFontSize", AttributeType::Number)
                    .with_default(15),
            )
            .with(
                AttributeDescriptor::new("contentColor", AttributeType::String)
                    .with_default("#444444"),
            )
            .with(AttributeDescriptor::new("buttonWidth", AttributeType::Number).with_default(250))
            .with(
                AttributeDescriptor::new("buttonFontSize", AttributeType::Number).with_default(14),
            )
            .with(
                AttributeDescriptor::new("buttonColor", AttributeType::String)
                    .with_default("#E27330"),
            )
            .with(
                AttributeDescriptor::new("buttonTextColor", AttributeType::String)
                    .with_default("#ffffff"),
            )
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
            .with_class("ub_call_to_action")
            .with_child(
                EditNode::element("div")
                    .with_class("ub_call_to_action_headline")
                    .with_child(self.text_field(
                        attrs,
                        state,
                        "ub_call_to_action_headline_text",
                        "cta_headline",
                        "Add A Catchy Headline Here",
                        self.headline_style(attrs),
                    )),
            )
            .with_child(
                EditNode::element("div")
                    .with_class("ub_call_to_action_content")
                    .with_child(self.text_field(
                        attrs,
                        state,
                        "ub_cta_content_text",
                        "cta_content",
                        "Add Call to Action Text Here",
                        self.content_style(attrs),
                    )),
            )
            .with_child(
                EditNode::element("div")
                    .with_class("ub_call_to_action_button")
                    .with_attr("style", self.button_box_style(attrs))
                    .with_child(self.text_field(
                        attrs,
                        state,
                        "ub_cta_button_text",
                        "cta_button",
                        "Button Text",
                        self.button_text_style(attrs),
                    )),
            );

        let inspector = if state.is_selected {
            vec![
                InspectorPanel::new("Headline Settings")
                    .open_by_default()
                    .with_control(InspectorControl::RangeSlider {
                        label: "Font Size".to_string(),
                        attribute: "headFontSize".to_string(),
                        value: int_attr(schema, attrs, "headFontSize"),
                        min: 10,
                        max: 200,
                        allow_reset: true,
                    })
                    .with_control(InspectorControl::ColorPalette {
                        label: "Font Color".to_string(),
                        attribute: "headColor".to_string(),
                        value: Some(str_attr(schema, attrs, "headColor")),
                        allow_reset: true,
                    }),
                InspectorPanel::new("Content Settings")
                    .with_control(InspectorControl::RangeSlider {
                        label: "Font Size".to_string(),
                        attribute: "contentFontSize".to_string(),
                        value: int_attr(schema, attrs, "contentFontSize"),
                        min: 10,
                        max: 200,
                        allow_reset: true,
                    })
                    .with_control(InspectorControl::ColorPalette {
                        label: "Font Color".to_string(),
                        attribute: "contentColor".to_string(),
                        value: Some(str_attr(schema, attrs, "contentColor")),
                        allow_reset: true,
                    }),
                InspectorPanel::new("Button Settings")
                    .with_control(InspectorControl::TextInput {
                        label: "Button Link".to_string(),
                        attribute: "url".to_string(),
                        value: attrs.get("url").and_then(|v| v.as_str()).map(String::from),
                    })
                    .with_control(InspectorControl::RangeSlider {
                        label: "Button Width".to_string(),
                        attribute: "buttonWidth".to_string(),
                        value: int_attr(schema, attrs, "buttonWidth"),
                        min: 10,
                        max: 600,
                        allow_reset: true,
                    })
                    .with_control(InspectorControl::RangeSlider {
                        label: "Font Size".to_string(),
                        attribute: "buttonFontSize".to_string(),
                        value: int_attr(schema, attrs, "buttonFontSize"),
                        min: 10,
                        max: 100,
                        allow_reset: true,
                    })
                    .with_control(InspectorControl::ColorPalette {
                        label: "Button Color".to_string(),
                        attribute: "buttonColor".to_string(),
                        value: Some(str_attr(schema, attrs, "buttonColor")),
                        allow_reset: true,
                    })
                    .with_control(InspectorControl::ColorPalette {
                        label: "Button Text Color".to_string(),
                        attribute: "buttonTextColor".to_string(),
                        value: Some(str_attr(schema, attrs, "buttonTextColor")),
                        allow_reset: true,
                    }),
            ]
        } else {
            Vec::new()
        };

        EditView { inspector, body }
    }

    pub fn save(&self, attrs: &AttributeSet) -> MarkupNode {
        let schema = &self.schema;

        let mut anchor = MarkupNode::element("a").with_class("ub_cta_button");
        codec::encode_attr(schema, attrs, "url", &mut anchor);
        let anchor = anchor.with_child(
            codec::encode_children(schema, attrs, "ub_cta_button_text", "p")
                .with_attr("style", self.button_text_style(attrs)),
        );

        MarkupNode::element("div")
            .with_class("ub_call_to_action")
            .with_child(
                MarkupNode::element("div")
                    .with_class("ub_call_to_action_headline")
                    .with_child(
                        codec::encode_children(
                            schema,
                            attrs,
                            "ub_call_to_action_headline_text",
                            "p",
                        )
                        .with_attr("style", self.headline_style(attrs)),
                    ),
            )
            .with_child(
                MarkupNode::element("div")
                    .with_class("ub_call_to_action_content")
                    .with_child(
                        codec::encode_children(schema, attrs, "ub_cta_content_text", "p")
                            .with_attr("style", self.content_style(attrs)),
                    ),
            )
            .with_child(
                MarkupNode::element("div")
                    .with_class("ub_call_to_action_button")
                    .with_attr("style", self.button_box_style(attrs))
                    .with_child(anchor),
            )
    }

    // -- Style helpers -------------------------------------------------------

    fn headline_style(&self, attrs: &AttributeSet) -> String {
        inline_style(&[
            ("font-size", px(int_attr(&self.schema, attrs, "headFontSize"))),
            ("color", str_attr(&self.schema, attrs, "headColor")),
        ])
    }

    fn content_style(&self, attrs: &AttributeSet) -> String {
        inline_style(&[
            (
                "font-size",
                px(int_attr(&self.schema, attrs, "contentFontSize")),
            ),
            ("color", str_attr(&self.schema, attrs, "contentColor")),
        ])
    }

    fn button_box_style(&self, attrs: &AttributeSet) -> String {
        inline_style(&[
            ("width", px(int_attr(&self.schema, attrs, "buttonWidth"))),
            (
                "background-color",
                str_attr(&self.schema, attrs, "buttonColor"),
            ),
        ])
    }

    fn button_text_style(&self, attrs: &AttributeSet) -> String {
        inline_style(&[
            (
                "font-size",
                px(int_attr(&self.schema, attrs, "buttonFontSize")),
            ),
            ("color", str_attr(&self.schema, attrs, "buttonTextColor")),
        ])
    }

    fn text_field(
        &self,
        attrs: &AttributeSet,
        state: &EditState,
        attribute: &str,
        field: &str,
        placeholder: &str,
        style: String,
    ) -> EditNode {
        EditNode::RichTextField(RichTextField {
            attribute: attribute.to_string(),
            tag: "p".to_string(),
            class: attribute.to_string(),
            style: Some(style),
            placeholder: placeholder.to_string(),
            value: rich_attr(&self.schema, attrs, attribute),
            field: field.to_string(),
            is_active: state.is_selected && state.active_field.as_deref() == Some(field),
        })
    }
}

impl Default for CallToActionBlock {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
