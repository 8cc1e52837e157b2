//! Acceptance tests for the built-in block bundle
//!
//! Exercises the documented editing flows end to end: filling a
//! testimonial, removing its image, switching notification severity,
//! and reloading blocks from their own saved markup.

#[cfg(test)]
mod tests {
    use crate::blocks::notification_box::NOTIFY_WARNING;
    use crate::blocks::{BlockType, NotificationBoxBlock, TestimonialBlock};
    use crate::core::attribute::{AttributeSet, AttributeUpdate, AttributeValue};
    use crate::core::codec;
    use crate::core::markup::{MarkupNode, Selector};
    use crate::editor::media::MediaAttachment;

    fn paragraph(text: &str) -> MarkupNode {
        MarkupNode::element("p").with_child(MarkupNode::text(text))
    }

    fn jane_doe_attributes(block: &TestimonialBlock) -> AttributeSet {
        let mut attrs = block.schema().defaults();
        attrs.apply(
            AttributeUpdate::new()
                .set(
                    "ub_testimonial_text",
                    vec![
                        paragraph("The product changed how our team works."),
                        paragraph("We rolled it out to every department."),
                    ],
                )
                .set(
                    "ub_testimonial_author",
                    vec![MarkupNode::text("Jane Doe")],
                )
                .set(
                    "ub_testimonial_author_role",
                    vec![MarkupNode::text("CTO, Example Corp")],
                ),
        );
        attrs.apply(
            TestimonialBlock::image_binding()
                .select(&MediaAttachment::new(42, "https://x/y.jpg", "Jane")),
        );
        attrs
    }

    /// A filled testimonial saves its image, quote, and sign-off
    #[test]
    fn test_testimonial_worked_example() {
        let block = TestimonialBlock::new();
        let attrs = jane_doe_attributes(&block);
        assert_eq!(attrs.get("imgID"), Some(&AttributeValue::Integer(42)));

        let markup = block.save(&attrs);

        let img = markup.find_first(&Selector::tag("img")).unwrap();
        assert_eq!(img.attr("src"), Some("https://x/y.jpg"));
        assert_eq!(img.attr("alt"), Some("Jane"));

        let quote = markup
            .find_first(&Selector::class("ub_testimonial_text"))
            .unwrap();
        assert_eq!(quote.children().len(), 2);
        assert!(quote.children().iter().all(|c| c.tag() == Some("p")));

        let author = markup
            .find_first(&Selector::class("ub_testimonial_author"))
            .unwrap();
        assert_eq!(author.text_content(), "Jane Doe");
    }

    /// Reloading a saved testimonial recovers everything but the asset id
    #[test]
    fn test_testimonial_reload_loses_only_the_asset_id() {
        let block = TestimonialBlock::new();
        let attrs = jane_doe_attributes(&block);

        let reloaded = codec::reconstruct(block.schema(), &block.save(&attrs));

        assert_eq!(
            reloaded.get("ub_testimonial_author"),
            attrs.get("ub_testimonial_author")
        );
        assert_eq!(reloaded.get("imgURL"), attrs.get("imgURL"));
        assert_eq!(reloaded.get("imgAlt"), attrs.get("imgAlt"));
        assert!(!reloaded.contains("imgID"));
    }

    /// Removing the image clears the whole binding and the saved markup
    #[test]
    fn test_image_removal_resets_and_omits() {
        let block = TestimonialBlock::new();
        let mut attrs = jane_doe_attributes(&block);

        attrs.apply(TestimonialBlock::image_binding().clear());

        assert!(!attrs.contains("imgID"));
        assert!(!attrs.contains("imgURL"));
        assert!(!attrs.contains("imgAlt"));

        let markup = block.save(&attrs);
        assert!(markup.find_first(&Selector::tag("img")).is_none());
        assert!(!markup.to_html().contains("<img"));

        // The quote itself is untouched by the removal.
        let quote = markup
            .find_first(&Selector::class("ub_testimonial_text"))
            .unwrap();
        assert_eq!(quote.children().len(), 2);
    }

    /// A fresh testimonial renders its declared defaults
    #[test]
    fn test_testimonial_default_styling() {
        let block = TestimonialBlock::new();
        let html = block.save(&block.schema().defaults()).to_html();

        assert!(html.contains("background-color: #f4f6f6"));
        assert!(html.contains("color: #444444"));
        assert!(html.contains("font-size: 17px"));
        assert!(!html.contains("<img"));
    }

    /// Severity survives a save and reload cycle
    #[test]
    fn test_notification_severity_round_trip() {
        let block = NotificationBoxBlock::new();
        let mut attrs = block.schema().defaults();
        attrs.set("ub_selected_notify", NOTIFY_WARNING);
        attrs.set(
            "ub_notify_info",
            vec![MarkupNode::text("Scheduled maintenance tonight.")],
        );

        let saved = block.save(&attrs);
        assert!(saved.has_class(NOTIFY_WARNING));

        let reloaded = codec::reconstruct(block.schema(), &saved);
        assert_eq!(
            reloaded.get("ub_selected_notify"),
            Some(&AttributeValue::String(NOTIFY_WARNING.to_string()))
        );
        assert_eq!(block.save(&reloaded).to_html(), saved.to_html());
    }

    /// Saving is a pure function of the attributes
    #[test]
    fn test_save_is_deterministic() {
        for block in BlockType::all() {
            let attrs = block.schema().defaults();
            let first = block.save(&attrs);
            let second = block.save(&attrs);
            assert_eq!(first, second, "{}", block.name());
            assert_eq!(first.to_html(), second.to_html(), "{}", block.name());
        }
    }

    /// Attributes without a markup source reset on reload
    #[test]
    fn test_unsourced_attributes_reset_on_reload() {
        let divider = BlockType::all()
            .into_iter()
            .find(|b| b.name() == "ub/divider")
            .unwrap();

        let mut attrs = divider.schema().defaults();
        attrs.set("borderColor", "#ff0000");
        assert!(divider.save(&attrs).to_html().contains("#ff0000"));

        // Styling lives only in the rendered style attribute, so a
        // reload starts over from the declared defaults.
        let reloaded = codec::reconstruct(divider.schema(), &divider.save(&attrs));
        assert!(reloaded.is_empty());
        assert!(divider.save(&reloaded).to_html().contains("#ccc"));
    }
}
