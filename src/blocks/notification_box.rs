//! Notification Box Block
//!
//! A colored callout for inline notices. The severity is stored as the
//! wrapper's own class attribute, so it reads back from saved markup just
//! like the text does, and switching severity swaps the entire wrapper
//! class.
//!
//! ## Attributes
//!
//! | Attribute | Type | Source |
//! |-----------|------|--------|
//! | `ub_notify_info` | rich text | children of `.ub_notify_text` |
//! | `ub_selected_notify` | string | `class` of `div`, default `ub_notify_info` |

use crate::core::attribute::{
    AttributeDescriptor, AttributeSchema, AttributeSet, AttributeSource, AttributeType,
};
use crate::core::block::{BlockCategory, BlockMetadata, EditState};
use crate::core::codec;
use crate::core::markup::{MarkupNode, Selector};
use crate::editor::view::{
    EditNode, EditView, InspectorControl, InspectorPanel, RichTextField, SelectOption,
};

use super::{rich_attr, str_attr};

/// Wrapper class for the informational severity.
pub const NOTIFY_INFO: &str = "ub_notify_info";
/// Wrapper class for the success severity.
pub const NOTIFY_SUCCESS: &str = "ub_notify_success";
/// Wrapper class for the warning severity.
pub const NOTIFY_WARNING: &str = "ub_notify_warning";

// ---------------------------------------------------------------------------
// NotificationBoxBlock
// ---------------------------------------------------------------------------

/// Notification box block: severity-classed callout with one text region.
#[derive(Debug, Clone)]
pub struct NotificationBoxBlock {
    metadata: BlockMetadata,
    schema: AttributeSchema,
}

impl NotificationBoxBlock {
    pub fn new() -> Self {
        Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema(),
        }
    }

    // -- Definition builders -------------------------------------------------

    fn build_metadata() -> BlockMetadata {
        BlockMetadata::new(
            "ub/notification-box",
            "Notification Box",
            BlockCategory::Formatting,
        )
        .with_icon("warning")
        .with_keywords(&["notification", "notify", "Ultra Blocks"])
    }

    fn build_schema() -> AttributeSchema {
        AttributeSchema::new()
            .with(
                AttributeDescriptor::new("ub_notify_info", AttributeType::RichText)
                    .with_source(AttributeSource::children(Selector::class("ub_notify_text"))),
            )
            .with(
                AttributeDescriptor::new("ub_selected_notify", AttributeType::String)
                    .with_source(AttributeSource::attribute(Selector::tag("div"), "class"))
                    .with_default(NOTIFY_INFO),
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
        let severity = str_attr(schema, attrs, "ub_selected_notify");

        let body = EditNode::element("div")
            .with_class(severity.as_str())
            .with_child(EditNode::RichTextField(RichTextField {
                attribute: "ub_notify_info".to_string(),
                tag: "p".to_string(),
                class: "ub_notify_text".to_string(),
                style: None,
                placeholder: "Add your notification text here".to_string(),
                value: rich_attr(schema, attrs, "ub_notify_info"),
                field: "notify_text".to_string(),
                is_active: state.is_selected
                    && state.active_field.as_deref() == Some("notify_text"),
            }));

        let inspector = if state.is_selected {
            vec![InspectorPanel::new("Notification Type")
                .open_by_default()
                .with_control(InspectorControl::Select {
                    label: "Notification Type".to_string(),
                    attribute: "ub_selected_notify".to_string(),
                    value: severity,
                    options: vec![
                        SelectOption::new(NOTIFY_INFO, "Info"),
                        SelectOption::new(NOTIFY_SUCCESS, "Success"),
                        SelectOption::new(NOTIFY_WARNING, "Warning"),
                    ],
                })]
        } else {
            Vec::new()
        };

        EditView { inspector, body }
    }

    pub fn save(&self, attrs: &AttributeSet) -> MarkupNode {
        let schema = &self.schema;

        // The severity class is written through its own codec rule, so the
        // wrapper's class attribute is exactly what reconstruction reads.
        let mut root = MarkupNode::element("div");
        codec::encode_attr(schema, attrs, "ub_selected_notify", &mut root);

        root.with_child(codec::encode_children(schema, attrs, "ub_notify_info", "p"))
    }
}

impl Default for NotificationBoxBlock {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
