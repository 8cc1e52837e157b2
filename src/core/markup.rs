//! Markup tree for block rendering
//!
//! This module defines the markup node tree that block save functions
//! produce and the host document stores. Rendering to HTML text is
//! deterministic: element attributes keep insertion order and all entity
//! escaping is fixed, so identical trees always produce identical text.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Selectors ───────────────────────────────────────────────────────────────

/// A selector addressing one kind of element inside block markup.
///
/// Selectors are the link between an attribute schema and the markup a
/// block saves: the encoder places a value in the element the selector
/// names, and the decoder finds it again by the same rule. The textual
/// form matches CSS (`.ub_testimonial_text`, `img`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Selector {
    /// Matches any element carrying the class.
    Class(String),
    /// Matches elements by tag name.
    Tag(String),
}

impl Selector {
    /// Selector for elements with the given class.
    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    /// Selector for elements with the given tag name.
    pub fn tag(name: impl Into<String>) -> Self {
        Selector::Tag(name.into())
    }

    /// The class name this selector carries, if it is a class selector.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Selector::Class(name) => Some(name),
            Selector::Tag(_) => None,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, ".{}", name),
            Selector::Tag(name) => write!(f, "{}", name),
        }
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

impl TryFrom<String> for Selector {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        match text.strip_prefix('.') {
            Some("") => Err(format!("empty class selector: '{}'", text)),
            Some(name) => Ok(Selector::Class(name.to_string())),
            None if text.is_empty() => Err("empty selector".to_string()),
            None => Ok(Selector::Tag(text)),
        }
    }
}

// ── Nodes ───────────────────────────────────────────────────────────────────

/// Elements that render without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

/// A node in a block's markup tree.
///
/// Rich-text attribute values are sequences of these same nodes, so a
/// saved block and the text a user typed share one representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkupNode {
    /// An element with a tag, ordered attributes, and child nodes.
    Element {
        /// Tag name, lowercase.
        tag: String,
        /// Attributes in insertion order.
        attrs: Vec<(String, String)>,
        /// Child nodes in document order.
        children: Vec<MarkupNode>,
    },
    /// A run of text.
    Text {
        /// The text content, unescaped.
        text: String,
    },
}

impl MarkupNode {
    /// Create an element node with no attributes or children.
    pub fn element(tag: impl Into<String>) -> Self {
        MarkupNode::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text { text: text.into() }
    }

    /// Set the `class` attribute (builder style).
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    /// Set an attribute (builder style). Replaces an existing value in
    /// place, otherwise appends.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child node (builder style).
    pub fn with_child(mut self, child: MarkupNode) -> Self {
        if let MarkupNode::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Append a sequence of child nodes (builder style).
    pub fn with_children(mut self, nodes: Vec<MarkupNode>) -> Self {
        if let MarkupNode::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    /// Whether this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, MarkupNode::Element { .. })
    }

    /// Tag name, for element nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupNode::Element { tag, .. } => Some(tag),
            MarkupNode::Text { .. } => None,
        }
    }

    /// Look up an attribute value on an element node.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            MarkupNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            MarkupNode::Text { .. } => None,
        }
    }

    /// Set an attribute on an element node. Replaces an existing value in
    /// place so attribute order stays stable; text nodes ignore the call.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        if let MarkupNode::Element { attrs, .. } = self {
            let name = name.into();
            let value = value.into();
            match attrs.iter_mut().find(|(key, _)| *key == name) {
                Some(slot) => slot.1 = value,
                None => attrs.push((name, value)),
            }
        }
    }

    /// Whether an element node carries the given class.
    pub fn has_class(&self, name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_ascii_whitespace().any(|c| c == name))
            .unwrap_or(false)
    }

    /// Child nodes; empty for text nodes.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element { children, .. } => children,
            MarkupNode::Text { .. } => &[],
        }
    }

    /// Concatenated text of this node and its descendants, in document
    /// order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text { text } => out.push_str(text),
            MarkupNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Whether this node is an element matching the selector.
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(name) => self.has_class(name),
            Selector::Tag(name) => self.tag() == Some(name.as_str()),
        }
    }

    /// Depth-first search for the first element matching the selector,
    /// the node itself included.
    pub fn find_first(&self, selector: &Selector) -> Option<&MarkupNode> {
        if self.matches(selector) {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_first(selector))
    }

    /// Render the tree to HTML text.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            MarkupNode::Text { text } => escape_text(text, out),
            MarkupNode::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attr(value, out);
                    out.push('"');
                }
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in children {
                    child.render_into(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

// ── Rendering helpers ───────────────────────────────────────────────────────

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

/// Join style declarations into an inline `style` attribute value.
pub fn inline_style(decls: &[(&str, String)]) -> String {
    decls
        .iter()
        .map(|(prop, value)| format!("{}: {}", prop, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Format a numeric style value as pixels.
pub fn px(value: i64) -> String {
    format!("{}px", value)
}
