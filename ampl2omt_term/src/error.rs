//! Error types for term construction and operator lookup.

use thiserror::Error;

/// Errors raised by the operator registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// No operator is registered under this opcode.
    #[error("Unknown operator opcode: {0}")]
    UnknownOpcode(i64),
}
