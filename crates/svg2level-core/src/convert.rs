//! Conversion pipeline entry points
//!
//! `convert` runs the whole pipeline against the filesystem: parse the SVG,
//! classify and decode its shapes, then write the level file through a
//! staged temporary file so a failed run never clobbers an existing output.
//! `list_scripts` answers the narrower question of which script files a
//! document references, without producing any output file.

use crate::element::RectElement;
use crate::error::{LevelError, Result};
use crate::level::Level;
use crate::parser::{parse_svg, parse_svg_str, SvgDocument};
use crate::writer::write_level;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Options for level conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Base directory for resolving script paths
    ///
    /// `None` resolves scripts relative to the SVG document's own directory.
    pub script_root: Option<PathBuf>,
}

impl ConvertOptions {
    /// Set the directory script paths resolve against
    #[inline]
    #[must_use = "returns options with the script root configured"]
    pub fn with_script_root(mut self, root: PathBuf) -> Self {
        self.script_root = Some(root);
        self
    }
}

/// Convert an SVG document on disk into a level file
///
/// The output is staged in a temporary file next to `output_path` and only
/// renamed over it once the whole level has been written.
///
/// # Errors
///
/// Returns an error if the SVG cannot be read or parsed, a shape fails
/// decoding, a referenced script file cannot be read, or the output cannot
/// be written.
pub fn convert(svg_path: &Path, output_path: &Path, options: &ConvertOptions) -> Result<()> {
    let doc = parse_svg(svg_path)?;
    let level = Level::from_document(&doc)?;

    let script_root = match &options.script_root {
        Some(root) => root.as_path(),
        None => svg_path.parent().unwrap_or_else(|| Path::new(".")),
    };
    log::debug!(
        "Converting {} with script root {}",
        svg_path.display(),
        script_root.display()
    );

    let out_dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(out_dir)?;
    let mut writer = BufWriter::new(temp);
    write_level(&level, script_root, &mut writer)?;
    let temp = writer
        .into_inner()
        .map_err(|e| LevelError::Io(e.into_error()))?;
    temp.persist(output_path)
        .map_err(|e| LevelError::Io(e.error))?;
    Ok(())
}

/// Convert SVG content already in memory, writing the level to `out`
///
/// Script paths resolve against `script_root`.
///
/// # Errors
///
/// Returns an error if the content cannot be parsed, a shape fails
/// decoding, or a referenced script file cannot be read.
pub fn convert_str<W: Write>(content: &str, script_root: &Path, out: &mut W) -> Result<()> {
    let doc = parse_svg_str(content)?;
    let level = Level::from_document(&doc)?;
    write_level(&level, script_root, out)
}

/// List the script files referenced by a document on disk
///
/// Matches rectangles whose id starts with `script`, then those starting
/// with `player`, and takes the first token of each child command line.
/// Arguments are not included, and nothing is read from disk beyond the
/// document itself.
///
/// # Errors
///
/// Returns an error if the SVG cannot be read or parsed.
pub fn list_scripts(svg_path: &Path) -> Result<Vec<String>> {
    let doc = parse_svg(svg_path)?;
    Ok(scripts_of(&doc))
}

/// List the script files referenced by SVG content already in memory
///
/// # Errors
///
/// Returns an error if the content cannot be parsed.
pub fn list_scripts_str(content: &str) -> Result<Vec<String>> {
    let doc = parse_svg_str(content)?;
    Ok(scripts_of(&doc))
}

fn scripts_of(doc: &SvgDocument) -> Vec<String> {
    let mut scripts = Vec::new();
    collect_script_paths(&doc.rects, "script", &mut scripts);
    collect_script_paths(&doc.rects, "player", &mut scripts);
    scripts
}

/// First token of every child command line of rects matching the id prefix
fn collect_script_paths(rects: &[RectElement], prefix: &str, scripts: &mut Vec<String>) {
    for rect in rects {
        let Some(id) = rect.id.as_deref() else {
            continue;
        };
        if !id.starts_with(prefix) {
            continue;
        }
        for child in &rect.children {
            if let Some(path) = child.split_whitespace().next() {
                scripts.push(path.to_string());
            }
        }
    }
}
