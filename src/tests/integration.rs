//! Integration tests: wiring the registry, editor session, and settings
//! store together
//!
//! These tests simulate a realistic editing run:
//!   activate → insert blocks → edit attributes → save → reload

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::blocks::notification_box::NOTIFY_SUCCESS;
    use crate::core::attribute::{AttributeUpdate, AttributeValue};
    use crate::core::markup::MarkupNode;
    use crate::core::registry::BlockRegistry;
    use crate::editor::media::MediaAttachment;
    use crate::editor::session::EditorSession;
    use crate::settings::activation::{ActivationOutcome, Activator, SETTINGS_KEY};
    use crate::settings::file::FileSettings;
    use crate::settings::SettingsRepository;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    }

    fn new_session() -> EditorSession {
        let registry = BlockRegistry::with_builtins().unwrap();
        EditorSession::new(Arc::new(registry))
    }

    fn paragraph(text: &str) -> MarkupNode {
        MarkupNode::element("p").with_child(MarkupNode::text(text))
    }

    // ====================================================================
    // Test 1: Full document lifecycle (edit → save → reload → save)
    // ====================================================================

    #[test]
    fn test_document_survives_reload() {
        init_tracing();

        // --- Step 1: Build a three-block document ---
        let mut session = new_session();
        let notice = session.insert_block("ub/notification-box").unwrap();
        let testimonial = session.insert_block("ub/testimonial-block").unwrap();
        session.insert_block("ub/divider").unwrap();
        assert_eq!(session.len(), 3);

        // --- Step 2: Fill the blocks in ---
        session
            .update_attributes(
                notice,
                AttributeUpdate::new()
                    .set("ub_notify_info", vec![paragraph("Back up before upgrading.")])
                    .set("ub_selected_notify", NOTIFY_SUCCESS),
            )
            .unwrap();
        session
            .update_attributes(
                testimonial,
                AttributeUpdate::new()
                    .set("ub_testimonial_text", vec![paragraph("Support answered in minutes.")])
                    .set("ub_testimonial_author", vec![MarkupNode::text("Jane Doe")]),
            )
            .unwrap();
        session
            .select_image(
                testimonial,
                &MediaAttachment::new(42, "https://x/y.jpg", "Jane"),
            )
            .unwrap();

        // --- Step 3: Serialize the document ---
        let saved: Vec<MarkupNode> = session
            .instances()
            .iter()
            .map(|i| session.save_block(i.id).unwrap())
            .collect();
        let rendered = session.render_document().unwrap();
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("https://x/y.jpg"));
        assert!(rendered.contains("Jane Doe"));

        // --- Step 4: Reload into a fresh session, in document order ---
        let mut reloaded = new_session();
        for (name, markup) in ["ub/notification-box", "ub/testimonial-block", "ub/divider"]
            .iter()
            .zip(&saved)
        {
            reloaded.load_block(name, markup).unwrap();
        }

        // The asset id was never written to markup, so it is gone; the
        // URL and alt text came back through the codec.
        let restored = &reloaded.instances()[1];
        assert!(!restored.attributes.contains("imgID"));
        assert_eq!(
            restored.attributes.get("imgURL"),
            Some(&AttributeValue::String("https://x/y.jpg".to_string()))
        );

        // --- Step 5: Re-render and compare ---
        // Only markup-sourced attributes were edited, so the reloaded
        // document serializes to the same bytes.
        assert_eq!(reloaded.render_document().unwrap(), rendered);
    }

    // ====================================================================
    // Test 2: Activation against a file-backed settings store
    // ====================================================================

    #[test]
    fn test_activation_across_reopens() {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let registry = BlockRegistry::with_builtins().unwrap();
        let activator = Activator::new(&registry);

        // --- Step 1: First activation seeds the catalog ---
        let mut settings = FileSettings::new(&path);
        assert_eq!(
            activator.activate(&mut settings).unwrap(),
            ActivationOutcome::Seeded
        );

        let catalog = settings.get(SETTINGS_KEY).unwrap().unwrap();
        let entries = catalog.as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|e| e["active"] == true));

        // --- Step 2: A later activation sees the stored value ---
        let mut reopened = FileSettings::new(&path);
        assert_eq!(
            activator.activate(&mut reopened).unwrap(),
            ActivationOutcome::AlreadyPresent
        );
        assert_eq!(reopened.get(SETTINGS_KEY).unwrap(), Some(catalog));
    }

    // ====================================================================
    // Test 3: Selection, caret routing, and the image slot
    // ====================================================================

    #[test]
    fn test_editing_surface_follows_state() {
        init_tracing();

        let mut session = new_session();
        let cta = session.insert_block("ub/call-to-action").unwrap();
        let testimonial = session.insert_block("ub/testimonial-block").unwrap();

        // --- Step 1: Selection gates the inspector ---
        session.set_selected(cta, true).unwrap();
        assert!(!session.edit_view(cta).unwrap().inspector.is_empty());
        assert!(session.edit_view(testimonial).unwrap().inspector.is_empty());

        // --- Step 2: The caret lands in exactly one field ---
        session
            .set_active_field(cta, Some("cta_headline".to_string()))
            .unwrap();
        let view = session.edit_view(cta).unwrap();
        let headline = view.body.find_field("ub_call_to_action_headline_text").unwrap();
        assert!(headline.is_active);
        assert!(!view.body.find_field("ub_cta_content_text").unwrap().is_active);

        // Selecting the other block clears the caret.
        session.set_selected(testimonial, true).unwrap();
        let view = session.edit_view(cta).unwrap();
        assert!(!view.body.find_field("ub_call_to_action_headline_text").unwrap().is_active);

        // --- Step 3: The image slot swaps between prompt and preview ---
        let view = session.edit_view(testimonial).unwrap();
        assert!(view.body.find_placeholder().is_some());
        assert!(view.body.find_preview().is_none());

        session
            .select_image(testimonial, &MediaAttachment::new(7, "https://x/p.jpg", "p"))
            .unwrap();
        let view = session.edit_view(testimonial).unwrap();
        assert!(view.body.find_placeholder().is_none());
        let preview = view.body.find_preview().unwrap();
        assert_eq!(preview.url, "https://x/p.jpg");

        session.remove_image(testimonial).unwrap();
        let view = session.edit_view(testimonial).unwrap();
        assert!(view.body.find_placeholder().is_some());

        // The saved markup never carried the image after removal.
        let html = session.save_block(testimonial).unwrap().to_html();
        assert!(!html.contains("<img"));
    }

    // ====================================================================
    // Test 4: Session-level reconstruction across every block type
    // ====================================================================

    #[test]
    fn test_save_output_feeds_the_parser() {
        init_tracing();

        // Every block type's untouched save output must reload into an
        // instance that serializes to the same bytes.
        let names: Vec<String> = new_session()
            .registry()
            .get_all_blocks()
            .iter()
            .map(|b| b.name().to_string())
            .collect();

        for name in names {
            let mut source = new_session();
            let id = source.insert_block(&name).unwrap();
            let markup = source.save_block(id).unwrap();

            let mut target = new_session();
            let reloaded = target.load_block(&name, &markup).unwrap();
            assert_eq!(
                target.save_block(reloaded).unwrap().to_html(),
                markup.to_html(),
                "{name}"
            );
        }
    }
}
