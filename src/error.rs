//! Error type shared by every llll operation.
//!
//! All failures are deterministic structural problems (a bad address, a shape
//! mismatch, an operator applied to the wrong kinds of atoms, malformed file
//! contents) or plain I/O failures. None of them are retried internally.

use std::io;

use thiserror::Error;

use crate::lexer::Position;

/// Errors that can occur while building, addressing, combining or
/// (de)serializing a tree.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlllError {
    /// An address step did not resolve (index out of range, key not found,
    /// descent into an atom).
    #[error("Address error: {0}")]
    Address(String),

    /// Broadcasting found no pairing between two lists of these lengths.
    #[error("Shape error: cannot pair lists of length {left} and {right}")]
    Shape { left: usize, right: usize },

    /// Operator or accessor applied to a kind of node it has no meaning for.
    #[error("Type error: {0}")]
    Type(String),

    /// Division or modulo by zero, or zero raised to a negative power.
    #[error("Division by zero")]
    DivisionByZero,

    /// Malformed serialized input.
    #[error("File format error at {position}: {message}")]
    FileFormat { position: Position, message: String },

    /// File name without a `.txt` or `.llll` extension.
    #[error("Unsupported file extension: '{0}' (expected .txt or .llll)")]
    UnsupportedExtension(String),

    /// Reading or writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LlllError {
    pub(crate) fn format(position: Position, message: impl Into<String>) -> Self {
        LlllError::FileFormat {
            position,
            message: message.into(),
        }
    }

    /// Check if this error comes from address resolution
    pub fn is_address_error(&self) -> bool {
        matches!(self, LlllError::Address(_))
    }

    /// Check if this error is a broadcasting shape mismatch
    pub fn is_shape_error(&self) -> bool {
        matches!(self, LlllError::Shape { .. })
    }

    /// Check if this error is an operator/kind mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, LlllError::Type(_))
    }

    /// Check if this error was raised while reading serialized input
    pub fn is_format_error(&self) -> bool {
        matches!(self, LlllError::FileFormat { .. })
    }

    /// Position of the offending token, for format errors
    pub fn position(&self) -> Option<Position> {
        match self {
            LlllError::FileFormat { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, LlllError>;
