//! SVG to level converter for the nothing game
//!
//! Levels are drawn in any SVG editor and tagged through element ids:
//! rectangles named `background` and `player` (exactly one each), prefixed
//! families like `rect*`, `backrect*`, `goal*`, `lava*`, `box*` and
//! `script*`, and text elements named `label*`. This crate classifies those
//! shapes, decodes their geometry and fill colors, inlines the script files
//! referenced from shape children, and serializes everything into the
//! line-oriented level format the game loads.
//!
//! ## Examples
//!
//! Convert a level file:
//!
//! ```rust,no_run
//! use svg2level_core::{convert, ConvertOptions};
//! use std::path::Path;
//!
//! convert(
//!     Path::new("level.svg"),
//!     Path::new("level.txt"),
//!     &ConvertOptions::default(),
//! )?;
//! # Ok::<(), svg2level_core::LevelError>(())
//! ```
//!
//! Parse from a string:
//!
//! ```rust
//! use svg2level_core::parse_svg_str;
//!
//! let svg = r##"<svg><rect id="player" x="1" y="2" style="fill:#e40000"/></svg>"##;
//! let doc = parse_svg_str(svg)?;
//! assert_eq!(doc.rects.len(), 1);
//! # Ok::<(), svg2level_core::LevelError>(())
//! ```
//!
//! ## Format Details
//!
//! The output is nine sections in a fixed order (background, player,
//! platforms, goals, lavas, back platforms, boxes, labels, script regions).
//! List sections open with a decimal count line; shapes that reference
//! scripts are followed by the script's contents, prefixed with a
//! synthesized `(set args ...)` declaration and a line count.

pub mod classify;
pub mod convert;
pub mod element;
pub mod error;
pub mod level;
pub mod parser;
pub mod script;
pub mod style;
pub mod writer;

// Re-export main types
pub use classify::{classify, rect_category, text_category, CategorizedShapes, Category};
pub use convert::{convert, convert_str, list_scripts, list_scripts_str, ConvertOptions};
pub use element::{RectElement, TextElement};
pub use error::{LevelError, Result};
pub use level::Level;
pub use parser::{parse_svg, parse_svg_str, SvgDocument};
pub use script::{ScriptBlock, ScriptRef};
pub use style::color_of_style;
pub use writer::write_level;
