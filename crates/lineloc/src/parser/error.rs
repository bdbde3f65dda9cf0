//! Parse error types for line keys.

use thiserror::Error;

/// An error that occurred while parsing the textual form of a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },

    /// A parameter name without a value, e.g. the trailing `Key` in `Culture:en:Key`.
    #[error("parameter '{name}' has no value")]
    DanglingParameter { name: String },

    /// An empty parameter name, e.g. `:value`.
    #[error("empty parameter name at column {column}")]
    EmptyName { column: usize },
}
