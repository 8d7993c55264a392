//! Error types for PQL statement building.

use thiserror::Error;

use crate::value::TypeTag;

/// The main error type for PQL operations.
#[derive(Debug, Error)]
pub enum PqlError {
    /// The value's shape matches none of the coercible kinds.
    #[error("Type {type_name} is not a supported PQL value. Value is {value}")]
    UnsupportedType {
        type_name: &'static str,
        value: String,
    },

    /// A set mixed elements of different types.
    #[error("All set elements must have the same type: expected {expected}, found {found}")]
    HeterogeneousSet { expected: TypeTag, found: TypeTag },

    /// Exactly one of SELECT / FROM was given.
    #[error("SELECT and FROM must be used together: {missing} clause is missing")]
    ClauseMismatch { missing: &'static str },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PqlError {
    /// Create an unsupported type error for the given runtime type.
    pub fn unsupported(type_name: &'static str, value: impl ToString) -> Self {
        Self::UnsupportedType {
            type_name,
            value: value.to_string(),
        }
    }

    /// Create a clause mismatch error naming the missing clause.
    pub fn missing_clause(missing: &'static str) -> Self {
        Self::ClauseMismatch { missing }
    }
}

/// Result type alias for PQL operations.
pub type PqlResult<T> = Result<T, PqlError>;
