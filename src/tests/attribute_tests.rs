//! Tests for the attribute system
//!
//! Attributes describe a block's data: typed descriptors with defaults
//! and markup sources, a sparse per-instance store, and partial updates.

#[cfg(test)]
mod tests {
    use crate::core::attribute::*;
    use crate::core::markup::{MarkupNode, Selector};
    use serde_json::json;

    fn schema() -> AttributeSchema {
        AttributeSchema::new()
            .with(
                AttributeDescriptor::new("body", AttributeType::RichText)
                    .with_source(AttributeSource::children(Selector::class("body"))),
            )
            .with(
                AttributeDescriptor::new("color", AttributeType::String)
                    .with_default("#f4f6f6"),
            )
            .with(AttributeDescriptor::new("size", AttributeType::Number).with_default(17))
            .with(AttributeDescriptor::new("counter", AttributeType::Number))
    }

    /// Test value accessors across the value kinds
    #[test]
    fn test_value_accessors() {
        let rich = AttributeValue::RichText(vec![MarkupNode::text("hi")]);
        let string = AttributeValue::String("test".to_string());
        let integer = AttributeValue::Integer(42);
        let number = AttributeValue::Number(3.5);

        assert_eq!(rich.as_rich_text().map(|n| n.len()), Some(1));
        assert_eq!(string.as_str(), Some("test"));
        assert_eq!(integer.as_integer(), Some(42));
        assert_eq!(number.as_number(), Some(3.5));
        assert!(AttributeValue::Null.is_null());

        // Numeric kinds convert across each other.
        assert_eq!(integer.as_number(), Some(42.0));
        assert_eq!(number.as_integer(), Some(3));
    }

    /// Whole numbers survive a JSON round-trip as integers
    #[test]
    fn test_value_serde_keeps_integer_shape() {
        let value = AttributeValue::Integer(17);
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, "17");

        let back: AttributeValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, AttributeValue::Integer(17));
    }

    /// Values deserialize untagged from natural JSON shapes
    #[test]
    fn test_value_serde_untagged() {
        assert_eq!(
            serde_json::from_value::<AttributeValue>(json!("x")).unwrap(),
            AttributeValue::String("x".to_string())
        );
        assert_eq!(
            serde_json::from_value::<AttributeValue>(json!(2.5)).unwrap(),
            AttributeValue::Number(2.5)
        );
        assert_eq!(
            serde_json::from_value::<AttributeValue>(json!(null)).unwrap(),
            AttributeValue::Null
        );
        assert_eq!(
            serde_json::from_value::<AttributeValue>(json!([{"type": "text", "text": "hi"}]))
                .unwrap(),
            AttributeValue::RichText(vec![MarkupNode::text("hi")])
        );
    }

    /// Sources serialize with a snake_case tag and textual selectors
    #[test]
    fn test_source_serde() {
        let children = AttributeSource::children(Selector::class("body"));
        assert_eq!(
            serde_json::to_value(&children).unwrap(),
            json!({"source": "children", "selector": ".body"})
        );

        let attribute = AttributeSource::attribute(Selector::tag("img"), "src");
        assert_eq!(
            serde_json::to_value(&attribute).unwrap(),
            json!({"source": "attribute", "selector": "img", "attribute": "src"})
        );

        assert_eq!(
            serde_json::to_value(AttributeSource::None).unwrap(),
            json!({"source": "none"})
        );
    }

    /// Test source classification and selector access
    #[test]
    fn test_source_selector() {
        let children = AttributeSource::children(Selector::class("body"));
        assert!(children.is_markup_sourced());
        assert_eq!(children.selector(), Some(&Selector::class("body")));

        assert!(!AttributeSource::None.is_markup_sourced());
        assert_eq!(AttributeSource::None.selector(), None);
    }

    /// Test schema lookups and the markup-sourced filter
    #[test]
    fn test_schema_lookups() {
        let schema = schema();
        assert_eq!(schema.len(), 4);
        assert!(schema.get("color").is_some());
        assert!(schema.get("missing").is_none());

        let sourced: Vec<&str> = schema.markup_sourced().map(|d| d.name.as_str()).collect();
        assert_eq!(sourced, vec!["body"]);
    }

    /// Fresh instances start from declared defaults only
    #[test]
    fn test_schema_defaults() {
        let defaults = schema().defaults();
        assert_eq!(defaults.len(), 2);
        assert_eq!(
            defaults.get("color"),
            Some(&AttributeValue::String("#f4f6f6".to_string()))
        );
        assert_eq!(defaults.get("size"), Some(&AttributeValue::Integer(17)));
        assert!(!defaults.contains("body"));
        assert!(!defaults.contains("counter"));
    }

    /// Resolution falls back from explicit value to default to null
    #[test]
    fn test_resolution_chain() {
        let schema = schema();
        let mut attrs = AttributeSet::new();

        assert_eq!(
            attrs.resolve(&schema, "color"),
            AttributeValue::String("#f4f6f6".to_string())
        );
        assert_eq!(attrs.resolve(&schema, "counter"), AttributeValue::Null);
        assert_eq!(attrs.resolve(&schema, "unknown"), AttributeValue::Null);

        attrs.set("color", "#000000");
        assert_eq!(
            attrs.resolve(&schema, "color"),
            AttributeValue::String("#000000".to_string())
        );
    }

    /// Setting null removes the explicit entry so the default applies again
    #[test]
    fn test_null_unsets() {
        let schema = schema();
        let mut attrs = AttributeSet::new();

        attrs.set("color", "#111111");
        assert!(attrs.contains("color"));

        attrs.set("color", AttributeValue::Null);
        assert!(!attrs.contains("color"));
        assert_eq!(
            attrs.resolve(&schema, "color"),
            AttributeValue::String("#f4f6f6".to_string())
        );
    }

    /// Test the update builder and application order
    #[test]
    fn test_update_builder() {
        let update = AttributeUpdate::new()
            .set("a", 1i64)
            .set("b", "two")
            .clear("c");

        let changes = update.changes();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].0, "a");
        assert_eq!(changes[2], ("c".to_string(), AttributeValue::Null));
        assert!(!update.is_empty());
        assert!(AttributeUpdate::new().is_empty());
    }

    /// Applying an update touches exactly the named attributes
    #[test]
    fn test_apply_is_partial() {
        let mut attrs = AttributeSet::new();
        attrs.set("keep", "kept");
        attrs.set("drop", "dropped");
        attrs.set("change", 1i64);

        attrs.apply(AttributeUpdate::new().set("change", 2i64).clear("drop"));

        assert_eq!(
            attrs.get("keep"),
            Some(&AttributeValue::String("kept".to_string()))
        );
        assert_eq!(attrs.get("change"), Some(&AttributeValue::Integer(2)));
        assert_eq!(attrs.get("drop"), None);
    }

    /// Attribute sets serialize transparently as a JSON object
    #[test]
    fn test_set_serde_transparent() {
        let mut attrs = AttributeSet::new();
        attrs.set("size", 17i64);

        let value = serde_json::to_value(&attrs).unwrap();
        assert_eq!(value, json!({"size": 17}));

        let back: AttributeSet = serde_json::from_value(value).unwrap();
        assert_eq!(back, attrs);
    }

    /// Test validation result accumulation
    #[test]
    fn test_validation_result() {
        let ok = ValidationResult::ok();
        assert!(ok.valid);
        assert!(!ok.has_errors());

        let mut result = ValidationResult::ok();
        result.push_error("bad");
        assert!(!result.valid);
        assert!(result.has_errors());

        let merged = ValidationResult::ok()
            .with_warning("note")
            .merge(ValidationResult::error("fail"));
        assert!(!merged.valid);
        assert_eq!(merged.errors, vec!["fail".to_string()]);
        assert_eq!(merged.warnings, vec!["note".to_string()]);
    }
}
