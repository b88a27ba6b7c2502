//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Lookups never produce these: a missing id is `None` and a name with no
/// matches is an empty list. Errors are reserved for operations the caller
/// asked for that cannot be carried out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed boundary validation (e.g. stock outside min/max).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// An id counter has issued its last value.
    #[error("{0} ids exhausted")]
    IdsExhausted(&'static str),

    /// A positional operation referenced a slot past the end of a collection.
    #[error("index {index} out of bounds for collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The operation conflicts with current state (e.g. deleting a product
    /// that still has associated parts).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn ids_exhausted(kind: &'static str) -> Self {
        Self::IdsExhausted(kind)
    }

    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }
}
