//! Error handling for LabelKit
//!
//! Interactive canvas operations never fail; errors only arise at the
//! boundaries where templates and files are read or written.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Template error type
///
/// Represents problems found while interpreting a stored or generated
/// label template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Label dimensions are missing, zero or negative
    #[error("Invalid label dimensions: {width} x {height}")]
    InvalidDimensions {
        /// The width that was rejected.
        width: f64,
        /// The height that was rejected.
        height: f64,
    },

    /// The dimension unit is not one of mm, inch or px
    #[error("Unsupported unit: {unit}")]
    UnsupportedUnit {
        /// The unit string that was rejected.
        unit: String,
    },

    /// Two elements share the same id
    #[error("Duplicate element id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

/// Main error type for LabelKit
///
/// Errors raised while reading templates and generator output.
#[derive(Error, Debug)]
pub enum Error {
    /// Template error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this is a template error
    pub fn is_template_error(&self) -> bool {
        matches!(self, Error::Template(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
