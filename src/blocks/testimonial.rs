//! Testimonial Block
//!
//! A quote card with an optional square portrait, the testimonial body,
//! and an author sign-off (name plus role). Card background and text
//! styling are block-level attributes; the portrait comes from the host's
//! media picker and is bound to three attributes that change together.
//!
//! ## Attributes
//!
//! | Attribute | Type | Source |
//! |-----------|------|--------|
//! | `ub_testimonial_text` | rich text | children of `.ub_testimonial_text` |
//! | `ub_testimonial_author` | rich text | children of `.ub_testimonial_author` |
//! | `ub_testimonial_author_role` | rich text | children of `.ub_testimonial_author_role` |
//! | `imgURL` | string | `src` of `img` |
//! | `imgID` | number | none (session-only) |
//! | `imgAlt` | string | `alt` of `img` |
//! | `backgroundColor` | string | none, default `#f4f6f6` |
//! | `textColor` | string | none, default `#444444` |
//! | `textSize` | number | none, default `17` |

use crate::core::attribute::{
    AttributeDescriptor, AttributeSchema, AttributeSet, AttributeSource, AttributeType,
};
use crate::core::block::{BlockCategory, BlockMetadata, EditState};
use crate::core::codec;
use crate::core::markup::{inline_style, px, MarkupNode, Selector};
use crate::editor::media::ImageBinding;
use crate::editor::view::{
    EditNode, EditView, ImagePreview, InspectorControl, InspectorPanel, MediaPlaceholder,
    RichTextField,
};

use super::{int_attr, rich_attr, str_attr};

/// Preview edge length in the edit view and saved markup, in pixels.
const IMAGE_EDGE: u32 = 100;

// ---------------------------------------------------------------------------
// TestimonialBlock
// ---------------------------------------------------------------------------

/// Testimonial block: quote, author, role, optional portrait.
#[derive(Debug, Clone)]
pub struct TestimonialBlock {
    metadata: BlockMetadata,
    schema: AttributeSchema,
}

impl TestimonialBlock {
    pub fn new() -> Self {
        Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema(),
        }
    }

    // -- Definition builders -------------------------------------------------

    fn build_metadata() -> BlockMetadata {
        BlockMetadata::new("ub/testimonial-block", "Testimonial", BlockCategory::Formatting)
            .with_icon("format-quote")
            .with_keywords(&["testimonial", "quotes", "Ultra Blocks"])
    }

    fn build_schema() -> AttributeSchema {
        AttributeSchema::new()
            .with(
                AttributeDescriptor::new("ub_testimonial_text", AttributeType::RichText)
                    .with_source(AttributeSource::children(Selector::class(
                        "ub_testimonial_text",
                    ))),
            )
            .with(
                AttributeDescriptor::new("ub_testimonial_author", AttributeType::RichText)
                    .with_source(AttributeSource::children(Selector::class(
                        "ub_testimonial_author",
                    ))),
            )
            .with(
                AttributeDescriptor::new("ub_testimonial_author_role", AttributeType::RichText)
                    .with_source(AttributeSource::children(Selector::class(
                        "ub_testimonial_author_role",
                    ))),
            )
            .with(
                AttributeDescriptor::new("imgURL", AttributeType::String)
                    .with_source(AttributeSource::attribute(Selector::tag("img"), "src")),
            )
            .with(AttributeDescriptor::new("imgID", AttributeType::Number))
            .with(
                AttributeDescriptor::new("imgAlt", AttributeType::String)
                    .with_source(AttributeSource::attribute(Selector::tag("img"), "alt")),
            )
            .with(
                AttributeDescriptor::new("backgroundColor", AttributeType::String)
                    .with_default("#f4f6f6"),
            )
            .with(
                AttributeDescriptor::new("textColor", AttributeType::String)
                    .with_default("#444444"),
            )
            .with(AttributeDescriptor::new("textSize", AttributeType::Number).with_default(17))
    }

    // -- Accessors -----------------------------------------------------------

    pub fn metadata(&self) -> &BlockMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// The binding the image slot routes selections and removals through.
    pub fn image_binding() -> ImageBinding {
        ImageBinding::new("imgID", "imgURL", "imgAlt")
    }

    // -- Rendering -----------------------------------------------------------

    /// Edit-time rendering: the card with editable text regions, the
    /// image slot as upload prompt or preview, and styling panels while
    /// selected.
    pub fn edit(&self, attrs: &AttributeSet, state: &EditState) -> EditView {
        let schema = &self.schema;

        // The upload prompt keys off the identifier, so a reloaded
        // instance asks for the image again even when a URL survived.
        let image_slot = if attrs.resolve(schema, "imgID").is_null() {
            EditNode::element("div")
                .with_class("ub_testimonial_upload_button")
                .with_child(EditNode::MediaPlaceholder(MediaPlaceholder {
                    button_label: "Upload Image".to_string(),
                    instructions: "Ideal Image size is Square i.e 150x150.".to_string(),
                    binding: Self::image_binding(),
                }))
        } else {
            EditNode::ImagePreview(ImagePreview {
                url: str_attr(schema, attrs, "imgURL"),
                alt: str_attr(schema, attrs, "imgAlt"),
                width: IMAGE_EDGE,
                height: IMAGE_EDGE,
                show_remove: state.is_selected,
                binding: Self::image_binding(),
            })
        };

        let body = EditNode::element("div")
            .with_class("ub_testimonial")
            .with_attr("style", self.card_style(attrs))
            .with_child(
                EditNode::element("div")
                    .with_class("ub_testimonial_img")
                    .with_child(image_slot),
            )
            .with_child(
                EditNode::element("div")
                    .with_class("ub_testimonial_content")
                    .with_child(self.text_field(
                        attrs,
                        state,
                        "ub_testimonial_text",
                        "p",
                        "testimonial_content",
                        "This is the testimonial body. Add the testimonial text you want to add here.",
                        Some(self.text_style(attrs)),
                    )),
            )
            .with_child(
                EditNode::element("div")
                    .with_class("ub_testimonial_sign")
                    .with_child(self.text_field(
                        attrs,
                        state,
                        "ub_testimonial_author",
                        "p",
                        "testimonial_author",
                        "John Doe",
                        None,
                    ))
                    .with_child(self.text_field(
                        attrs,
                        state,
                        "ub_testimonial_author_role",
                        "i",
                        "testimonial_author_role",
                        "Founder, Company X",
                        None,
                    )),
            );

        let inspector = if state.is_selected {
            vec![
                InspectorPanel::new("Background Color")
                    .open_by_default()
                    .with_control(InspectorControl::ColorPalette {
                        label: "Background Color".to_string(),
                        attribute: "backgroundColor".to_string(),
                        value: Some(str_attr(schema, attrs, "backgroundColor")),
                        allow_reset: true,
                    }),
                InspectorPanel::new("Testimonial Body")
                    .with_control(InspectorControl::ColorPalette {
                        label: "Font Color".to_string(),
                        attribute: "textColor".to_string(),
                        value: Some(str_attr(schema, attrs, "textColor")),
                        allow_reset: true,
                    })
                    .with_control(InspectorControl::RangeSlider {
                        label: "Font Size".to_string(),
                        attribute: "textSize".to_string(),
                        value: int_attr(schema, attrs, "textSize"),
                        min: 14,
                        max: 200,
                        allow_reset: true,
                    }),
            ]
        } else {
            Vec::new()
        };

        EditView { inspector, body }
    }

    /// Save-time rendering. The image wrapper is omitted entirely when no
    /// URL is set, so removal leaves no image markup behind.
    pub fn save(&self, attrs: &AttributeSet) -> MarkupNode {
        let schema = &self.schema;
        let mut root = MarkupNode::element("div")
            .with_class("ub_testimonial")
            .with_attr("style", self.card_style(attrs));

        if !str_attr(schema, attrs, "imgURL").is_empty() {
            let mut img = MarkupNode::element("img");
            codec::encode_attr(schema, attrs, "imgURL", &mut img);
            codec::encode_attr(schema, attrs, "imgAlt", &mut img);
            img.set_attr("height", IMAGE_EDGE.to_string());
            img.set_attr("width", IMAGE_EDGE.to_string());
            root = root.with_child(
                MarkupNode::element("div")
                    .with_class("ub_testimonial_img")
                    .with_child(img),
            );
        }

        root.with_child(
            MarkupNode::element("div")
                .with_class("ub_testimonial_content")
                .with_child(
                    codec::encode_children(schema, attrs, "ub_testimonial_text", "p")
                        .with_attr("style", self.text_style(attrs)),
                ),
        )
        .with_child(
            MarkupNode::element("div")
                .with_class("ub_testimonial_sign")
                .with_child(codec::encode_children(
                    schema,
                    attrs,
                    "ub_testimonial_author",
                    "p",
                ))
                .with_child(codec::encode_children(
                    schema,
                    attrs,
                    "ub_testimonial_author_role",
                    "i",
                )),
        )
    }

    // -- Style helpers -------------------------------------------------------

    fn card_style(&self, attrs: &AttributeSet) -> String {
        inline_style(&[
            (
                "background-color",
                str_attr(&self.schema, attrs, "backgroundColor"),
            ),
            ("color", str_attr(&self.schema, attrs, "textColor")),
        ])
    }

    fn text_style(&self, attrs: &AttributeSet) -> String {
        inline_style(&[("font-size", px(int_attr(&self.schema, attrs, "textSize")))])
    }

    #[allow(clippy::too_many_arguments)]
    fn text_field(
        &self,
        attrs: &AttributeSet,
        state: &EditState,
        attribute: &str,
        tag: &str,
        field: &str,
        placeholder: &str,
        style: Option<String>,
    ) -> EditNode {
        EditNode::RichTextField(RichTextField {
            attribute: attribute.to_string(),
            tag: tag.to_string(),
            class: attribute.to_string(),
            style,
            placeholder: placeholder.to_string(),
            value: rich_attr(&self.schema, attrs, attribute),
            field: field.to_string(),
            is_active: state.is_selected && state.active_field.as_deref() == Some(field),
        })
    }
}

impl Default for TestimonialBlock {
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
    use crate::core::attribute::AttributeValue;
    use crate::editor::media::MediaAttachment;

    fn block() -> TestimonialBlock {
        TestimonialBlock::new()
    }

    fn filled_attrs() -> AttributeSet {
        let mut attrs = block().schema().defaults();
        attrs.set(
            "ub_testimonial_text",
            vec![MarkupNode::text("Great product.")],
        );
        attrs.set("ub_testimonial_author", vec![MarkupNode::text("Jane Doe")]);
        attrs.set(
            "ub_testimonial_author_role",
            vec![MarkupNode::text("Founder")],
        );
        attrs.apply(TestimonialBlock::image_binding().select(&MediaAttachment::new(
            42,
            "https://x/y.jpg",
            "Jane",
        )));
        attrs
    }

    #[test]
    fn test_defaults() {
        let attrs = block().schema().defaults();
        assert_eq!(
            attrs.get("backgroundColor"),
            Some(&AttributeValue::String("#f4f6f6".to_string()))
        );
        assert_eq!(
            attrs.get("textColor"),
            Some(&AttributeValue::String("#444444".to_string()))
        );
        assert_eq!(attrs.get("textSize"), Some(&AttributeValue::Integer(17)));
        assert!(!attrs.contains("imgURL"));
    }

    #[test]
    fn test_save_contains_image_when_url_set() {
        let markup = block().save(&filled_attrs());
        let img = markup.find_first(&Selector::tag("img")).unwrap();
        assert_eq!(img.attr("src"), Some("https://x/y.jpg"));
        assert_eq!(img.attr("alt"), Some("Jane"));
        assert_eq!(img.attr("height"), Some("100"));
        assert_eq!(img.attr("width"), Some("100"));
    }

    #[test]
    fn test_save_omits_image_when_url_unset() {
        let markup = block().save(&block().schema().defaults());
        assert!(markup.find_first(&Selector::tag("img")).is_none());
        assert!(markup
            .find_first(&Selector::class("ub_testimonial_img"))
            .is_none());
    }

    #[test]
    fn test_save_styles_follow_attributes() {
        let mut attrs = filled_attrs();
        attrs.set("backgroundColor", "#101010");
        attrs.set("textSize", 40i64);

        let markup = block().save(&attrs);
        assert!(markup
            .attr("style")
            .unwrap()
            .contains("background-color: #101010"));
        let text = markup
            .find_first(&Selector::class("ub_testimonial_text"))
            .unwrap();
        assert_eq!(text.attr("style"), Some("font-size: 40px"));
    }

    #[test]
    fn test_markup_sourced_attributes_round_trip() {
        let b = block();
        let attrs = filled_attrs();
        let recovered = codec::reconstruct(b.schema(), &b.save(&attrs));

        for descriptor in b.schema().markup_sourced() {
            assert_eq!(
                recovered.get(&descriptor.name),
                attrs.get(&descriptor.name),
                "attribute {} did not round-trip",
                descriptor.name
            );
        }
        // Session-only identifier is not recoverable.
        assert!(!recovered.contains("imgID"));
    }

    #[test]
    fn test_edit_shows_upload_prompt_without_image() {
        let view = block().edit(&block().schema().defaults(), &EditState::selected());
        let placeholder = view.body.find_placeholder().unwrap();
        assert_eq!(placeholder.button_label, "Upload Image");
        assert_eq!(placeholder.instructions, "Ideal Image size is Square i.e 150x150.");
        assert!(view.body.find_preview().is_none());
    }

    #[test]
    fn test_edit_shows_preview_with_image() {
        let view = block().edit(&filled_attrs(), &EditState::selected());
        let preview = view.body.find_preview().unwrap();
        assert_eq!(preview.url, "https://x/y.jpg");
        assert_eq!(preview.width, 100);
        assert!(preview.show_remove);
        assert!(view.body.find_placeholder().is_none());
    }

    #[test]
    fn test_inspector_only_when_selected() {
        let attrs = block().schema().defaults();
        let selected = block().edit(&attrs, &EditState::selected());
        assert_eq!(selected.inspector.len(), 2);
        assert_eq!(selected.inspector[0].title, "Background Color");
        assert!(selected.inspector[0].initial_open);

        let unselected = block().edit(&attrs, &EditState::default());
        assert!(unselected.inspector.is_empty());
    }

    #[test]
    fn test_active_field_routing() {
        let attrs = block().schema().defaults();
        let state = EditState::selected().with_active_field("testimonial_author");
        let view = block().edit(&attrs, &state);

        let author = view.body.find_field("ub_testimonial_author").unwrap();
        assert!(author.is_active);
        let text = view.body.find_field("ub_testimonial_text").unwrap();
        assert!(!text.is_active);
    }
}
