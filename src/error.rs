//! Error types for grid and grid-data operations.

use thiserror::Error;

/// Errors raised by grid construction, arithmetic and interpolation.
///
/// The two variants mirror the two ways an argument can be wrong: it can be
/// of the wrong kind altogether, or of the right kind with invalid contents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Argument of the wrong category (e.g. an ordered reduction on complex data).
    #[error("Type error: {0}")]
    Type(String),

    /// Structurally invalid argument (mismatched lengths, incompatible grids, ...).
    #[error("Value error: {0}")]
    Value(String),
}

impl GridError {
    /// Create a value error.
    pub fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }

    /// Create a type error.
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::Type(msg.into())
    }

    /// Whether this is a value error.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Whether this is a type error.
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
