//! Style attribute decoding

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the fill color token inside a style attribute
static FILL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"fill:#([0-9a-fA-F]{6})").expect("Invalid fill color regex"));

/// Extract the six-digit hex fill color from a raw style attribute
///
/// The digits come back verbatim, in whatever case the document used.
/// Returns `None` when the style carries no `fill:#RRGGBB` token.
#[must_use]
pub fn color_of_style(style: &str) -> Option<&str> {
    FILL_PATTERN
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
