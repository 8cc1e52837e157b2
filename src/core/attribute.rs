//! Attribute system for block schemas
//!
//! This module defines the attribute system that describes a block's data:
//! typed descriptors with defaults and markup sources, the live attribute
//! store of a block instance, and the partial updates that mutate it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::markup::{MarkupNode, Selector};

/// Attribute types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    /// A sequence of markup nodes edited as rich text
    RichText,
    /// Plain string
    String,
    /// Numeric value
    Number,
}

/// Attribute value
///
/// Untagged so values read naturally from JSON. `Integer` is declared
/// before `Number` so whole numbers keep their integer shape through a
/// serialization round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Rich-text value: markup nodes in document order
    RichText(Vec<MarkupNode>),
    /// String value
    String(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Number(f64),
    /// Null value; applying it removes the explicit entry
    Null,
}

impl AttributeValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Try to view as rich text
    pub fn as_rich_text(&self) -> Option<&[MarkupNode]> {
        match self {
            AttributeValue::RichText(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Try to view as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            AttributeValue::Number(n) => Some(*n as i64),
            _ => None,
        }
    }

    /// Try to convert to a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<Vec<MarkupNode>> for AttributeValue {
    fn from(nodes: Vec<MarkupNode>) -> Self {
        AttributeValue::RichText(nodes)
    }
}

/// Where an attribute's value is recovered from when saved markup is
/// parsed back into attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AttributeSource {
    /// The child nodes of the element matching the selector
    Children {
        /// Selector of the carrier element
        selector: Selector,
    },
    /// A named attribute of the element matching the selector
    Attribute {
        /// Selector of the carrier element
        selector: Selector,
        /// Attribute name on that element
        attribute: String,
    },
    /// Stored verbatim; not recoverable from markup
    None,
}

impl AttributeSource {
    /// Source from the child nodes of the selected element
    pub fn children(selector: Selector) -> Self {
        AttributeSource::Children { selector }
    }

    /// Source from a named attribute of the selected element
    pub fn attribute(selector: Selector, attribute: impl Into<String>) -> Self {
        AttributeSource::Attribute {
            selector,
            attribute: attribute.into(),
        }
    }

    /// The selector this source reads through, if any
    pub fn selector(&self) -> Option<&Selector> {
        match self {
            AttributeSource::Children { selector } => Some(selector),
            AttributeSource::Attribute { selector, .. } => Some(selector),
            AttributeSource::None => Option::None,
        }
    }

    /// Whether the value can be recovered from saved markup
    pub fn is_markup_sourced(&self) -> bool {
        !matches!(self, AttributeSource::None)
    }
}

/// Attribute descriptor: one named, typed field of a block's schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute name, the key in the attribute store
    pub name: String,
    /// Attribute type
    pub attr_type: AttributeType,
    /// Recovery rule for saved markup
    pub source: AttributeSource,
    /// Value used when no explicit value is set
    pub default: Option<AttributeValue>,
}

impl AttributeDescriptor {
    /// Create a descriptor with no source and no default
    pub fn new(name: impl Into<String>, attr_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attr_type,
            source: AttributeSource::None,
            default: None,
        }
    }

    /// Set the markup source
    pub fn with_source(mut self, source: AttributeSource) -> Self {
        self.source = source;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<AttributeValue>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Ordered collection of attribute descriptors for one block type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeSchema {
    attributes: Vec<AttributeDescriptor>,
}

impl AttributeSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Append a descriptor (builder style)
    pub fn with(mut self, descriptor: AttributeDescriptor) -> Self {
        self.attributes.push(descriptor);
        self
    }

    /// Look up a descriptor by attribute name
    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|d| d.name == name)
    }

    /// Iterate descriptors in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter()
    }

    /// Descriptors whose values are recoverable from saved markup
    pub fn markup_sourced(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes
            .iter()
            .filter(|d| d.source.is_markup_sourced())
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the schema declares no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// The attribute set a fresh instance starts from: every declared
    /// default, nothing else.
    pub fn defaults(&self) -> AttributeSet {
        let mut set = AttributeSet::new();
        for descriptor in &self.attributes {
            if let Some(default) = &descriptor.default {
                set.set(descriptor.name.clone(), default.clone());
            }
        }
        set
    }
}

/// Live attribute store of one block instance.
///
/// Holds only explicit values; anything unset falls back to the schema
/// default at resolution time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: HashMap<String, AttributeValue>,
}

impl AttributeSet {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Get the explicit value for an attribute, if one is set
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Whether an explicit value is set for the attribute
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Set an explicit value. A null value removes the entry instead, so
    /// the schema default applies again.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        if value.is_null() {
            self.values.remove(&name);
        } else {
            self.values.insert(name, value);
        }
    }

    /// Remove an explicit value
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.values.remove(name)
    }

    /// Apply a partial update: each change lands or clears its own
    /// attribute, every other attribute is untouched.
    pub fn apply(&mut self, update: AttributeUpdate) {
        for (name, value) in update.changes {
            if value.is_null() {
                self.values.remove(&name);
            } else {
                self.values.insert(name, value);
            }
        }
    }

    /// Resolve an attribute against a schema: the explicit value if set,
    /// else the declared default, else null.
    pub fn resolve(&self, schema: &AttributeSchema, name: &str) -> AttributeValue {
        if let Some(value) = self.values.get(name) {
            return value.clone();
        }
        schema
            .get(name)
            .and_then(|d| d.default.clone())
            .unwrap_or(AttributeValue::Null)
    }

    /// Number of explicit values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no explicit values are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate explicit entries (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.values.iter()
    }
}

/// A set of attribute changes applied atomically to one instance.
///
/// Controls in the edit view name the attributes they mutate; applying a
/// control change builds one of these. Selecting an image produces a
/// three-attribute update, removing it a three-attribute clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeUpdate {
    changes: Vec<(String, AttributeValue)>,
}

impl AttributeUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Update for a single attribute
    pub fn single(name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::new().set(name, value)
    }

    /// Add a change (builder style)
    pub fn set(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.changes.push((name.into(), value.into()));
        self
    }

    /// Add a clearing change: the attribute's explicit value is removed
    pub fn clear(self, name: impl Into<String>) -> Self {
        self.set(name, AttributeValue::Null)
    }

    /// The changes in application order
    pub fn changes(&self) -> &[(String, AttributeValue)] {
        &self.changes
    }

    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Validation result
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Error messages
    pub errors: Vec<String>,
    /// Warning messages
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a validation result with an error
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![msg.into()],
            warnings: Vec::new(),
        }
    }

    /// Record an error
    pub fn push_error(&mut self, msg: impl Into<String>) {
        self.valid = false;
        self.errors.push(msg.into());
    }

    /// Add a warning (builder style)
    pub fn with_warning(mut self, msg: impl Into<String>) -> Self {
        self.warnings.push(msg.into());
        self
    }

    /// Check if the validation has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Merge another validation result into this one
    pub fn merge(mut self, other: ValidationResult) -> Self {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}
