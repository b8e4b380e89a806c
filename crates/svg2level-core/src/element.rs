//! Shape element structures extracted from the SVG document
//!
//! Attribute values stay the verbatim text the document carried. The level
//! format copies them through unchanged, so nothing here is parsed into
//! numbers.

use crate::error::{LevelError, Result};

/// A rectangle element extracted from the SVG
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RectElement {
    /// Element ID (if specified)
    pub id: Option<String>,

    /// X coordinate attribute text
    pub x: Option<String>,

    /// Y coordinate attribute text
    pub y: Option<String>,

    /// Width attribute text
    pub width: Option<String>,

    /// Height attribute text
    pub height: Option<String>,

    /// Raw style attribute
    pub style: Option<String>,

    /// Text content of each child element, in document order
    pub children: Vec<String>,

    /// Position in the document traversal
    pub doc_index: usize,
}

impl RectElement {
    /// Identifier for diagnostics, with a placeholder when absent
    #[inline]
    #[must_use]
    pub fn id_or_anon(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }

    /// Look up a required attribute by name
    ///
    /// # Errors
    ///
    /// Returns `LevelError::MissingAttribute` if the attribute was absent.
    pub fn require(&self, attr: &'static str) -> Result<&str> {
        let value = match attr {
            "id" => self.id.as_deref(),
            "x" => self.x.as_deref(),
            "y" => self.y.as_deref(),
            "width" => self.width.as_deref(),
            "height" => self.height.as_deref(),
            "style" => self.style.as_deref(),
            _ => None,
        };
        value.ok_or_else(|| LevelError::MissingAttribute {
            shape: self.id_or_anon().to_string(),
            attr,
        })
    }
}

/// A text element extracted from the SVG
///
/// Its children are the text spans making up the displayed string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextElement {
    /// Element ID (if specified)
    pub id: Option<String>,

    /// X coordinate attribute text
    pub x: Option<String>,

    /// Y coordinate attribute text
    pub y: Option<String>,

    /// Raw style attribute
    pub style: Option<String>,

    /// Text content of each child element, in document order
    pub children: Vec<String>,

    /// Position in the document traversal
    pub doc_index: usize,
}

impl TextElement {
    /// Identifier for diagnostics, with a placeholder when absent
    #[inline]
    #[must_use]
    pub fn id_or_anon(&self) -> &str {
        self.id.as_deref().unwrap_or("<no id>")
    }

    /// Look up a required attribute by name
    ///
    /// # Errors
    ///
    /// Returns `LevelError::MissingAttribute` if the attribute was absent.
    pub fn require(&self, attr: &'static str) -> Result<&str> {
        let value = match attr {
            "id" => self.id.as_deref(),
            "x" => self.x.as_deref(),
            "y" => self.y.as_deref(),
            "style" => self.style.as_deref(),
            _ => None,
        };
        value.ok_or_else(|| LevelError::MissingAttribute {
            shape: self.id_or_anon().to_string(),
            attr,
        })
    }
}
