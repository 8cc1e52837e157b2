//! Edit view control tree
//!
//! What a block's edit function returns: a pure data description of the
//! interactive rendering. The body tree mirrors the save markup with
//! editable regions spliced in; inspector panels appear only while the
//! instance is selected. Every control names the attribute it mutates,
//! so each user interaction maps to one partial update.

use serde::{Deserialize, Serialize};

use crate::core::markup::MarkupNode;

use super::media::ImageBinding;

/// The complete edit-time rendering of one block instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditView {
    /// Sidebar panels; empty unless the instance is selected
    pub inspector: Vec<InspectorPanel>,
    /// The block body shown in the content area
    pub body: EditNode,
}

/// One collapsible sidebar panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorPanel {
    /// Panel title
    pub title: String,
    /// Whether the panel starts expanded
    pub initial_open: bool,
    /// Controls in display order
    pub controls: Vec<InspectorControl>,
}

impl InspectorPanel {
    /// Create a collapsed panel with no controls
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            initial_open: false,
            controls: Vec::new(),
        }
    }

    /// Start the panel expanded (builder style)
    pub fn open_by_default(mut self) -> Self {
        self.initial_open = true;
        self
    }

    /// Append a control (builder style)
    pub fn with_control(mut self, control: InspectorControl) -> Self {
        self.controls.push(control);
        self
    }
}

/// One interactive sidebar control bound to an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum InspectorControl {
    /// Color swatch palette
    ColorPalette {
        /// Control label
        label: String,
        /// Attribute the chosen color lands in
        attribute: String,
        /// Current color, if set
        value: Option<String>,
        /// Whether the palette offers a reset affordance
        allow_reset: bool,
    },
    /// Numeric slider; min/max are the control's own clamp, not block
    /// validation
    RangeSlider {
        /// Control label
        label: String,
        /// Attribute the chosen number lands in
        attribute: String,
        /// Current value
        value: i64,
        /// Lower clamp
        min: i64,
        /// Upper clamp
        max: i64,
        /// Whether the slider offers a reset affordance
        allow_reset: bool,
    },
    /// Dropdown select over a closed option set
    Select {
        /// Control label
        label: String,
        /// Attribute the chosen option lands in
        attribute: String,
        /// Currently selected option value
        value: String,
        /// Options in display order
        options: Vec<SelectOption>,
    },
    /// Single-line text input
    TextInput {
        /// Control label
        label: String,
        /// Attribute the typed text lands in
        attribute: String,
        /// Current text, if set
        value: Option<String>,
    },
}

/// One option of a select control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored attribute value
    pub value: String,
    /// Human-readable label
    pub label: String,
}

impl SelectOption {
    /// Create an option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A node of the edit-time body tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum EditNode {
    /// Static element wrapper mirroring the save markup
    Element {
        /// Tag name
        tag: String,
        /// Attributes in insertion order
        attrs: Vec<(String, String)>,
        /// Child nodes in display order
        children: Vec<EditNode>,
    },
    /// Editable rich-text region bound to one attribute
    RichTextField(RichTextField),
    /// Upload prompt shown while no image is selected
    MediaPlaceholder(MediaPlaceholder),
    /// Preview of the selected image with a remove affordance
    ImagePreview(ImagePreview),
}

impl EditNode {
    /// Create an element node with no attributes or children
    pub fn element(tag: impl Into<String>) -> Self {
        EditNode::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the `class` attribute (builder style)
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    /// Set an attribute (builder style); element nodes only
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let EditNode::Element { attrs, .. } = &mut self {
            let name = name.into();
            let value = value.into();
            match attrs.iter_mut().find(|(key, _)| *key == name) {
                Some(slot) => slot.1 = value,
                None => attrs.push((name, value)),
            }
        }
        self
    }

    /// Append a child node (builder style); element nodes only
    pub fn with_child(mut self, child: EditNode) -> Self {
        if let EditNode::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    /// Child nodes; empty for leaf controls
    pub fn children(&self) -> &[EditNode] {
        match self {
            EditNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first search for the first rich-text field bound to the
    /// given attribute
    pub fn find_field(&self, attribute: &str) -> Option<&RichTextField> {
        match self {
            EditNode::RichTextField(field) if field.attribute == attribute => Some(field),
            EditNode::Element { children, .. } => {
                children.iter().find_map(|child| child.find_field(attribute))
            }
            _ => None,
        }
    }

    /// Depth-first search for an upload placeholder
    pub fn find_placeholder(&self) -> Option<&MediaPlaceholder> {
        match self {
            EditNode::MediaPlaceholder(placeholder) => Some(placeholder),
            EditNode::Element { children, .. } => {
                children.iter().find_map(|child| child.find_placeholder())
            }
            _ => None,
        }
    }

    /// Depth-first search for an image preview
    pub fn find_preview(&self) -> Option<&ImagePreview> {
        match self {
            EditNode::ImagePreview(preview) => Some(preview),
            EditNode::Element { children, .. } => {
                children.iter().find_map(|child| child.find_preview())
            }
            _ => None,
        }
    }
}

/// Editable rich-text region bound to one attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextField {
    /// Attribute the typed value lands in
    pub attribute: String,
    /// Carrier tag, mirroring the save markup
    pub tag: String,
    /// Carrier class, mirroring the save markup
    pub class: String,
    /// Inline style carried by the rendered field
    pub style: Option<String>,
    /// Placeholder copy shown while empty
    pub placeholder: String,
    /// Current value
    pub value: Vec<MarkupNode>,
    /// Active-sub-field key this field answers to
    pub field: String,
    /// Whether this field currently receives editing focus
    pub is_active: bool,
}

/// Upload prompt for an empty image slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPlaceholder {
    /// Upload button label
    pub button_label: String,
    /// Guidance copy under the button
    pub instructions: String,
    /// Attributes an accepted selection lands in
    pub binding: ImageBinding,
}

/// Preview of the currently selected image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePreview {
    /// Asset URL
    pub url: String,
    /// Alternative text
    pub alt: String,
    /// Preview width in pixels
    pub width: u32,
    /// Preview height in pixels
    pub height: u32,
    /// Whether the remove affordance is shown (selected instances only)
    pub show_remove: bool,
    /// Attributes a removal clears
    pub binding: ImageBinding,
}
