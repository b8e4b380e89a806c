//! Script reference resolution
//!
//! A script reference is the command line found in a shape's child element:
//! the first token names a script file, the remaining tokens are arguments
//! handed to it. At serialization time the file is read and inlined into the
//! level, prefixed with a synthesized argument declaration.

use crate::error::{LevelError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A script command line attached to a shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptRef {
    /// Script file path, relative to the script root
    pub path: PathBuf,

    /// Positional arguments passed to the script
    pub args: Vec<String>,
}

impl ScriptRef {
    /// Parse a command line into path and arguments
    ///
    /// Returns `None` when the text holds no tokens at all.
    #[must_use]
    pub fn from_command_line(text: &str) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let path = PathBuf::from(tokens.next()?);
        let args = tokens.map(str::to_string).collect();
        Some(Self { path, args })
    }

    /// Render the argument declaration line
    ///
    /// `["foo", "bar"]` becomes `(set args '("foo" "bar"))`; an empty list
    /// becomes `(set args '())`. Arguments are not escaped, so quotes inside
    /// them corrupt the list literal.
    #[must_use]
    pub fn args_declaration(&self) -> String {
        let list = self
            .args
            .iter()
            .map(|arg| format!("\"{arg}\""))
            .collect::<Vec<_>>()
            .join(" ");
        format!("(set args '({list}))")
    }

    /// Read the referenced file and package it for the output stream
    ///
    /// Resolution happens fresh on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::ScriptFileNotFound` if the file cannot be read.
    pub fn resolve(&self, root: &Path) -> Result<ScriptBlock> {
        let full_path = root.join(&self.path);
        let content = fs::read_to_string(&full_path).map_err(|source| {
            LevelError::ScriptFileNotFound {
                path: full_path.clone(),
                source,
            }
        })?;
        Ok(ScriptBlock {
            args_line: self.args_declaration(),
            body: content.lines().map(str::to_string).collect(),
        })
    }
}

/// A resolved script ready for the output stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBlock {
    /// Synthesized argument declaration, first line of the block
    pub args_line: String,

    /// Script file lines, verbatim
    pub body: Vec<String>,
}

impl ScriptBlock {
    /// Count emitted before the block: the args line plus every body line
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.body.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_line_with_arguments() {
        let script =
            ScriptRef::from_command_line("boom.scm arg1 arg2").expect("should parse command line");
        assert_eq!(script.path, PathBuf::from("boom.scm"));
        assert_eq!(script.args, vec!["arg1", "arg2"]);
    }

    #[test]
    fn test_command_line_without_arguments() {
        let script = ScriptRef::from_command_line("  boom.scm  ").expect("should parse command line");
        assert_eq!(script.path, PathBuf::from("boom.scm"));
        assert!(script.args.is_empty());
    }

    #[test]
    fn test_command_line_empty() {
        assert_eq!(ScriptRef::from_command_line("   "), None);
        assert_eq!(ScriptRef::from_command_line(""), None);
    }

    #[test]
    fn test_args_declaration() {
        let script = ScriptRef::from_command_line("run.scm foo bar").expect("should parse");
        assert_eq!(script.args_declaration(), "(set args '(\"foo\" \"bar\"))");
    }

    #[test]
    fn test_args_declaration_empty() {
        let script = ScriptRef::from_command_line("run.scm").expect("should parse");
        assert_eq!(script.args_declaration(), "(set args '())");
    }

    #[test]
    fn test_resolve_counts_file_lines_plus_one() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("boom.scm"), "(print \"hi\")\n(quit)\n")
            .expect("Failed to write script");

        let script = ScriptRef::from_command_line("boom.scm a").expect("should parse");
        let block = script.resolve(dir.path()).expect("should resolve");

        assert_eq!(block.line_count(), 3);
        assert_eq!(block.args_line, "(set args '(\"a\"))");
        assert_eq!(block.body, vec!["(print \"hi\")", "(quit)"]);
    }

    #[test]
    fn test_resolve_preserves_interior_blank_lines() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("gap.scm"), "a\n\n").expect("Failed to write script");

        let script = ScriptRef::from_command_line("gap.scm").expect("should parse");
        let block = script.resolve(dir.path()).expect("should resolve");

        assert_eq!(block.body, vec!["a", ""]);
        assert_eq!(block.line_count(), 3);
    }

    #[test]
    fn test_resolve_file_without_trailing_newline() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("flat.scm"), "a\nb").expect("Failed to write script");

        let script = ScriptRef::from_command_line("flat.scm").expect("should parse");
        let block = script.resolve(dir.path()).expect("should resolve");

        assert_eq!(block.body, vec!["a", "b"]);
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let script = ScriptRef::from_command_line("nowhere.scm").expect("should parse");
        let err = script.resolve(dir.path()).expect_err("should fail to resolve");

        assert!(matches!(err, LevelError::ScriptFileNotFound { .. }));
    }
}
