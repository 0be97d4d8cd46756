//! Error types for reading `.nl` files.
//!
//! Errors fall into three groups: I/O (the input cannot be opened or read),
//! format (a line breaks its token contract or uses an unsupported construct),
//! and integrity (what was registered disagrees with what the header declared).
//! Format errors always carry the 1-based line number where they were detected.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing an `.nl` file.
#[derive(Debug, Error)]
pub enum NlError {
    // === I/O ===
    /// The input path does not exist.
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    /// The input path does not end in `.nl`.
    #[error("Not a .nl file: {path}")]
    WrongExtension { path: PathBuf },

    /// Reading the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Format ===
    /// A line violates its token-count or token-type contract.
    #[error("Line {line}: {message}")]
    Format { line: usize, message: String },

    /// A construct that is recognised but deliberately rejected.
    #[error("Line {line}: {feature} not supported")]
    Unsupported { line: usize, feature: &'static str },

    /// An `o<opcode>` expression names no registered operator.
    #[error("Line {line}: unknown operator opcode {opcode}")]
    UnknownOperator { line: usize, opcode: i64 },

    /// The input ended in the middle of the ten header lines.
    #[error("Invalid header: input ends at line {line}")]
    TruncatedHeader { line: usize },

    /// The input ended where another line was required.
    #[error("Line {line}: unexpected end of input")]
    UnexpectedEof { line: usize },

    // === Integrity ===
    /// An expression references a variable index that is not registered yet.
    #[error("Line {line}: variable {index} referenced before definition")]
    UndefinedVariable { line: usize, index: usize },

    /// Registered items disagree with the header counts.
    #[error("Expected {expected} {what}, got {actual}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The same index was registered twice.
    #[error("{what} {index} is already defined")]
    DuplicateIndex { what: &'static str, index: usize },

    /// An index beyond what the header declared.
    #[error("{what} index {index} out of range (header declares {limit})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    /// A variable never received a bound line.
    #[error("Variable {index} has no bounds")]
    MissingBounds { index: usize },
}

impl NlError {
    /// Create a format error for `line`.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create an unsupported-construct error for `line`.
    pub const fn unsupported(line: usize, feature: &'static str) -> Self {
        Self::Unsupported { line, feature }
    }

    /// Whether the error is a premature end of input.
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof { .. } | Self::TruncatedHeader { .. })
    }
}
