//! Error types for the vacancy builder.
//!
//! Builder operations fail in exactly two ways: the supplied parameters are
//! rejected by the validation rules ([`ValidationError`]), or the operation
//! was called before the element it must be attached to exists
//! ([`PrecedenceError`]). Neither leaves a partially modified document behind.

use thiserror::Error;

use crate::cursor::Cursor;
pub use crate::validation::{Rule, ValidationError, Violation};

/// Main error type for vacancy builder operations.
#[derive(Debug, Error)]
pub enum VacancyError {
    /// Parameters failed validation; the document was not touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Operation called out of order.
    #[error(transparent)]
    Precedence(#[from] PrecedenceError),

    /// Builder configuration could not be parsed.
    #[error("Invalid builder configuration: {0}")]
    Config(#[from] serde_yaml_ng::Error),
}

impl VacancyError {
    /// Returns the validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the precedence error, if this is one.
    #[must_use]
    pub fn as_precedence(&self) -> Option<&PrecedenceError> {
        match self {
            Self::Precedence(err) => Some(err),
            _ => None,
        }
    }
}

/// Ordering errors raised by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrecedenceError {
    /// The element an operation attaches to has not been created yet.
    #[error("{element} must be attached to a {ancestor} element. Did you call {create_with}()?")]
    MissingAncestor {
        element: &'static str,
        ancestor: &'static str,
        create_with: &'static str,
    },

    /// A cursor name may only be bound once per builder.
    #[error("\"{}\" already exists as a reference key", .0.tag())]
    DuplicateCursor(Cursor),

    /// Attempted to append children to a leaf or attribute-only element.
    #[error("<{tag}> cannot hold child elements")]
    NotAContainer { tag: String },

    /// A cursor points at a path that does not exist in the document.
    #[error("No element at {path}")]
    DanglingPath { path: String },
}

/// Result type alias for vacancy builder operations.
pub type Result<T> = std::result::Result<T, VacancyError>;
