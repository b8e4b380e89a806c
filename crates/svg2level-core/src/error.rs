//! Level conversion error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Level conversion errors
#[derive(Error, Debug)]
pub enum LevelError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML parsing error
    #[error("Invalid SVG document: {0}")]
    InvalidDocument(String),

    /// A required singleton shape is absent or duplicated
    #[error("Expected exactly one `{id}` shape, found {found}")]
    MissingRequiredShape {
        /// Identifier the document must carry exactly once
        id: &'static str,
        /// How many shapes actually matched
        found: usize,
    },

    /// A shape lacks an attribute its category needs
    #[error("Required attribute `{attr}` missing from shape `{shape}`")]
    MissingAttribute {
        /// Identifier of the offending shape
        shape: String,
        /// Name of the absent attribute
        attr: &'static str,
    },

    /// The style attribute carries no fill color token
    #[error("No fill color in style of shape `{shape}`")]
    MalformedStyle {
        /// Identifier of the offending shape
        shape: String,
    },

    /// A referenced script file could not be read
    #[error("Could not read script file `{}`: {source}", path.display())]
    ScriptFileNotFound {
        /// Resolved path of the script file
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },

    /// A shape that must reference a script has no command line child
    #[error("Shape `{shape}` has no script reference child")]
    MissingScriptChild {
        /// Identifier of the offending shape
        shape: String,
    },

    /// A script-carrying shape has more than one child
    #[error("Shape `{shape}` has more than one child")]
    MultipleScriptChildren {
        /// Identifier of the offending shape
        shape: String,
    },
}

/// Result type for level conversion operations
pub type Result<T> = std::result::Result<T, LevelError>;
