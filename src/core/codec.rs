//! Bidirectional attribute codec
//!
//! Save functions write markup-sourced attribute values into carrier
//! elements; the host parser recovers them later by re-applying each
//! schema source rule. Both directions run through this module, so an
//! attribute's selector is the single source of truth: changing it moves
//! the encoder and the decoder together.

use super::attribute::{
    AttributeDescriptor, AttributeSchema, AttributeSet, AttributeSource, AttributeType,
    AttributeValue, ValidationResult,
};
use super::markup::MarkupNode;

// ── Encoding ────────────────────────────────────────────────────────────────

/// Build the carrier element for a `Children`-sourced attribute.
///
/// The element gets the given tag, its class from the attribute's
/// selector, and the resolved rich-text value as children. Unknown
/// attribute names and non-rich-text values degrade to an empty carrier.
pub fn encode_children(
    schema: &AttributeSchema,
    attrs: &AttributeSet,
    name: &str,
    tag: &str,
) -> MarkupNode {
    let mut element = MarkupNode::element(tag);
    if let Some(class) = schema
        .get(name)
        .and_then(|d| d.source.selector())
        .and_then(|s| s.class_name())
    {
        element.set_attr("class", class);
    }
    if let Some(nodes) = attrs.resolve(schema, name).as_rich_text() {
        element = element.with_children(nodes.to_vec());
    }
    element
}

/// Write an `Attribute`-sourced value onto its carrier element.
///
/// The attribute name on the element comes from the schema source; a
/// null resolved value leaves the element untouched.
pub fn encode_attr(
    schema: &AttributeSchema,
    attrs: &AttributeSet,
    name: &str,
    element: &mut MarkupNode,
) {
    let Some(descriptor) = schema.get(name) else {
        return;
    };
    let AttributeSource::Attribute { attribute, .. } = &descriptor.source else {
        return;
    };
    if let Some(text) = scalar_text(&attrs.resolve(schema, name)) {
        element.set_attr(attribute.clone(), text);
    }
}

/// Render a scalar value as attribute text. Null has no text; rich text
/// flattens to its plain content.
pub fn scalar_text(value: &AttributeValue) -> Option<String> {
    match value {
        AttributeValue::String(s) => Some(s.clone()),
        AttributeValue::Integer(i) => Some(i.to_string()),
        AttributeValue::Number(n) => Some(n.to_string()),
        AttributeValue::RichText(nodes) => Some(
            nodes
                .iter()
                .map(|n| n.text_content())
                .collect::<String>(),
        ),
        AttributeValue::Null => None,
    }
}

// ── Decoding ────────────────────────────────────────────────────────────────

/// Recover one attribute's value from saved markup by re-applying its
/// source rule. Returns `None` when the attribute has no markup source,
/// when no element matches the selector, or when the carrier holds
/// nothing; the schema default applies downstream in all three cases.
///
/// An empty `Children` carrier decodes as absent rather than as an empty
/// run, so an instance saved without a value reloads without one.
pub fn decode_attribute(
    descriptor: &AttributeDescriptor,
    markup: &MarkupNode,
) -> Option<AttributeValue> {
    match &descriptor.source {
        AttributeSource::Children { selector } => {
            let element = markup.find_first(selector)?;
            if element.children().is_empty() {
                return None;
            }
            Some(AttributeValue::RichText(element.children().to_vec()))
        }
        AttributeSource::Attribute {
            selector,
            attribute,
        } => {
            let element = markup.find_first(selector)?;
            let raw = element.attr(attribute)?;
            parse_scalar(descriptor.attr_type, raw)
        }
        AttributeSource::None => None,
    }
}

/// Reconstruct the attribute set the host parser would produce for one
/// block: every markup-sourced attribute the markup still carries,
/// nothing else. Sourceless attributes are not recoverable and stay
/// unset.
pub fn reconstruct(schema: &AttributeSchema, markup: &MarkupNode) -> AttributeSet {
    let mut set = AttributeSet::new();
    for descriptor in schema.markup_sourced() {
        if let Some(value) = decode_attribute(descriptor, markup) {
            set.set(descriptor.name.clone(), value);
        }
    }
    set
}

fn parse_scalar(attr_type: AttributeType, raw: &str) -> Option<AttributeValue> {
    match attr_type {
        AttributeType::Number => raw
            .parse::<i64>()
            .map(AttributeValue::Integer)
            .ok()
            .or_else(|| raw.parse::<f64>().ok().map(AttributeValue::Number)),
        AttributeType::String | AttributeType::RichText => {
            Some(AttributeValue::String(raw.to_string()))
        }
    }
}

// ── Registration probe ──────────────────────────────────────────────────────

/// A synthetic present value of the given type, for probe renders.
pub fn sample_value(attr_type: AttributeType) -> AttributeValue {
    match attr_type {
        AttributeType::RichText => AttributeValue::RichText(vec![MarkupNode::text("sample")]),
        AttributeType::String => AttributeValue::String("sample".to_string()),
        AttributeType::Number => AttributeValue::Integer(1),
    }
}

/// An attribute set with every declared attribute present: defaults
/// where declared, synthetic values everywhere else.
pub fn sample_attributes(schema: &AttributeSchema) -> AttributeSet {
    let mut set = schema.defaults();
    for descriptor in schema.iter() {
        if !set.contains(&descriptor.name) {
            set.set(descriptor.name.clone(), sample_value(descriptor.attr_type));
        }
    }
    set
}

/// Check that a probe render covers the schema: every markup-sourced
/// attribute must be recoverable from it, or the attribute would be
/// silently lost on reload.
pub fn verify_coverage(schema: &AttributeSchema, probe: &MarkupNode) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for descriptor in schema.markup_sourced() {
        if decode_attribute(descriptor, probe).is_none() {
            let selector = descriptor
                .source
                .selector()
                .map(|s| s.to_string())
                .unwrap_or_default();
            result.push_error(format!(
                "attribute '{}' is not recoverable from the save output (selector '{}')",
                descriptor.name, selector
            ));
        }
    }
    result
}

// ── Tests ───────────────────────────────────────────────────────────────────
