//! Media attachments and the image attribute binding
//!
//! The asset picker is an external collaborator returning id/url/alt
//! triples. Image-bearing blocks bind that triple to three attributes
//! which always change together: selection sets all three as one update,
//! removal clears all three as one update.

use serde::{Deserialize, Serialize};

use crate::core::attribute::AttributeUpdate;

/// An asset chosen in the host's media picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// Numeric identifier in the host's media library
    pub id: i64,
    /// Resolved asset URL
    pub url: String,
    /// Alternative text
    pub alt: String,
}

impl MediaAttachment {
    /// Create an attachment triple
    pub fn new(id: i64, url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            alt: alt.into(),
        }
    }
}

/// Binding of an image slot to the three attributes that carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBinding {
    /// Attribute holding the numeric identifier (session-only)
    pub id_attribute: String,
    /// Attribute holding the asset URL
    pub url_attribute: String,
    /// Attribute holding the alt text
    pub alt_attribute: String,
}

impl ImageBinding {
    /// Create a binding over the three attribute names
    pub fn new(
        id_attribute: impl Into<String>,
        url_attribute: impl Into<String>,
        alt_attribute: impl Into<String>,
    ) -> Self {
        Self {
            id_attribute: id_attribute.into(),
            url_attribute: url_attribute.into(),
            alt_attribute: alt_attribute.into(),
        }
    }

    /// The update applied when an attachment is selected
    pub fn select(&self, attachment: &MediaAttachment) -> AttributeUpdate {
        AttributeUpdate::new()
            .set(self.id_attribute.clone(), attachment.id)
            .set(self.url_attribute.clone(), attachment.url.clone())
            .set(self.alt_attribute.clone(), attachment.alt.clone())
    }

    /// The update applied when the image is removed
    pub fn clear(&self) -> AttributeUpdate {
        AttributeUpdate::new()
            .clear(self.id_attribute.clone())
            .clear(self.url_attribute.clone())
            .clear(self.alt_attribute.clone())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
