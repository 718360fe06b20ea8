//! Reading and writing trees as files.
//!
//! The format follows the extension: `.txt` is the text form, `.llll` the
//! native form. Each call performs one blocking read or write.

use std::{fmt, fs, path::Path};

use tracing::debug;

use crate::{
    error::{LlllError, Result},
    node::Node,
    output::{to_native, to_text},
    parser::{parse_native, parse_text},
};

/// Serialization format of an llll document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable `.txt` layout
    Text,
    /// Exact single-line `.llll` form
    Native,
}

impl Format {
    /// Picks the format from the file extension.
    ///
    /// ```
    /// use llll::Format;
    ///
    /// assert_eq!(Format::from_path("scores.txt").unwrap(), Format::Text);
    /// assert_eq!(Format::from_path("dir/scores.llll").unwrap(), Format::Native);
    /// assert!(Format::from_path("scores.json").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Ok(Format::Text),
            Some("llll") => Ok(Format::Native),
            Some(other) => Err(LlllError::UnsupportedExtension(format!(".{}", other))),
            None => Err(LlllError::UnsupportedExtension(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Native => "llll",
        }
    }

    pub fn render(&self, node: &Node) -> String {
        match self {
            Format::Text => to_text(node),
            Format::Native => to_native(node),
        }
    }

    pub fn parse(&self, input: &str) -> Result<Node> {
        match self {
            Format::Text => parse_text(input),
            Format::Native => parse_native(input),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Native => write!(f, "native"),
        }
    }
}

/// Reads the tree stored at `path`.
pub fn read(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let contents = fs::read_to_string(path)?;
    debug!(path = %path.display(), %format, bytes = contents.len(), "reading llll file");
    format.parse(&contents)
}

/// Writes `node` to `path`, replacing any existing file.
pub fn write(node: &Node, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let contents = format.render(node);
    debug!(path = %path.display(), %format, bytes = contents.len(), "writing llll file");
    fs::write(path, contents)?;
    Ok(())
}

impl Node {
    /// See [`read`].
    pub fn read(path: impl AsRef<Path>) -> Result<Node> {
        read(path)
    }

    /// See [`write`].
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        write(self, path)
    }
}
