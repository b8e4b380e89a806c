//! SVG document parser
//!
//! Reduces an SVG file (XML format) to the rectangle and text elements the
//! level format is built from. Matching is on local element names, so
//! namespaced documents (`svg:rect`) parse the same as plain ones. The text
//! of each direct child element (`title`, `tspan`, ...) is collected per
//! shape; text sitting directly inside a shape is not.

use crate::element::{RectElement, TextElement};
use crate::error::{LevelError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parsed SVG document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgDocument {
    /// Rectangle elements in document order
    pub rects: Vec<RectElement>,

    /// Text elements in document order
    pub texts: Vec<TextElement>,
}

/// Parse SVG file from path
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read (`LevelError::Io`)
/// - The content is not valid XML (`LevelError::InvalidDocument`)
#[must_use = "parsing produces a result that should be handled"]
pub fn parse_svg(path: &Path) -> Result<SvgDocument> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;

    parse_svg_str(&content)
}

/// Helper struct for attribute parsing
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMap {
    attrs: std::collections::HashMap<String, String>,
}

impl AttrMap {
    #[inline]
    fn from_event(e: &quick_xml::events::BytesStart<'_>) -> Self {
        let mut attrs = std::collections::HashMap::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = String::from_utf8_lossy(&attr.value).to_string();
            attrs.insert(key, value);
        }
        Self { attrs }
    }

    #[inline]
    fn get_string(&self, key: &str) -> Option<String> {
        self.attrs.get(key).cloned()
    }
}

/// Local element name without any namespace prefix
#[inline]
fn local_name(e: &quick_xml::events::BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().local_name().as_ref()).to_string()
}

/// Parse rectangle element from attributes
#[inline]
fn parse_rect(attrs: &AttrMap, doc_index: usize) -> RectElement {
    RectElement {
        id: attrs.get_string("id"),
        x: attrs.get_string("x"),
        y: attrs.get_string("y"),
        width: attrs.get_string("width"),
        height: attrs.get_string("height"),
        style: attrs.get_string("style"),
        children: Vec::new(),
        doc_index,
    }
}

/// Parse text element from attributes
#[inline]
fn parse_text(attrs: &AttrMap, doc_index: usize) -> TextElement {
    TextElement {
        id: attrs.get_string("id"),
        x: attrs.get_string("x"),
        y: attrs.get_string("y"),
        style: attrs.get_string("style"),
        children: Vec::new(),
        doc_index,
    }
}

/// A rect or text element whose end tag has not been seen yet
#[derive(Debug, Clone, PartialEq, Eq)]
enum OpenShape {
    Rect(RectElement),
    Text(TextElement),
}

impl OpenShape {
    fn push_child(&mut self, text: String) {
        match self {
            Self::Rect(rect) => rect.children.push(text),
            Self::Text(elem) => elem.children.push(text),
        }
    }
}

/// Parser state for SVG parsing
#[derive(Debug, Clone, Default, PartialEq)]
struct ParseState {
    open: Option<OpenShape>,
    child_depth: usize,
    child_text: String,
}

impl ParseState {
    /// Finish the child element currently being read
    fn close_child(&mut self) {
        let text = self.child_text.trim_end().to_string();
        if let Some(shape) = self.open.as_mut() {
            shape.push_child(text);
        }
        self.child_text.clear();
    }
}

/// Parse SVG from string content
///
/// # Errors
///
/// Returns an error if the content is not valid XML
/// (`LevelError::InvalidDocument`).
#[must_use = "parsing produces a result that should be handled"]
pub fn parse_svg_str(content: &str) -> Result<SvgDocument> {
    let mut rects = Vec::new();
    let mut texts: Vec<TextElement> = Vec::new();
    let mut state = ParseState::default();

    let mut reader = Reader::from_str(content);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if state.open.is_some() {
                    if state.child_depth == 0 {
                        state.child_text.clear();
                    }
                    state.child_depth += 1;
                } else {
                    let doc_index = rects.len() + texts.len();
                    match local_name(&e).as_str() {
                        "rect" => {
                            state.open =
                                Some(OpenShape::Rect(parse_rect(&AttrMap::from_event(&e), doc_index)));
                        }
                        "text" => {
                            state.open =
                                Some(OpenShape::Text(parse_text(&AttrMap::from_event(&e), doc_index)));
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(shape) = state.open.as_mut() {
                    // An empty child element carries no text
                    if state.child_depth == 0 {
                        shape.push_child(String::new());
                    }
                } else {
                    let doc_index = rects.len() + texts.len();
                    match local_name(&e).as_str() {
                        "rect" => rects.push(parse_rect(&AttrMap::from_event(&e), doc_index)),
                        "text" => texts.push(parse_text(&AttrMap::from_event(&e), doc_index)),
                        _ => {}
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if state.open.is_some() && state.child_depth > 0 {
                    let text = e.unescape().unwrap_or_default().trim().to_string();
                    if !text.is_empty() {
                        state.child_text.push_str(&text);
                        state.child_text.push(' ');
                    }
                }
            }
            Ok(Event::End(_)) => {
                if state.open.is_some() {
                    if state.child_depth > 0 {
                        state.child_depth -= 1;
                        if state.child_depth == 0 {
                            state.close_child();
                        }
                    } else {
                        match state.open.take() {
                            Some(OpenShape::Rect(rect)) => rects.push(rect),
                            Some(OpenShape::Text(elem)) => texts.push(elem),
                            None => {}
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parse error in SVG: {e}");
                return Err(LevelError::InvalidDocument(e.to_string()));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(SvgDocument { rects, texts })
}
