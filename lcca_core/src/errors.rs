//! # Error Types
//!
//! Structured error types for lcca_core. Validation failures carry enough
//! context (field, offending value, reason) for the input-collection layer
//! to show a warning next to the right form field.
//!
//! ## Example
//!
//! ```rust
//! use lcca_core::errors::{LccaError, LccaResult};
//!
//! fn validate_quantity(quantity: f64) -> LccaResult<()> {
//!     if quantity < 0.0 {
//!         return Err(LccaError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for lcca_core operations
pub type LccaResult<T> = Result<T, LccaError>;

/// Structured error type for store and calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum LccaError {
    /// An input value is invalid (out of range, negative, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material/grade/unit combination not present in the catalog
    #[error("Unknown material combination: {material} ({grade}) in {unit}")]
    UnknownMaterial {
        material: String,
        grade: String,
        unit: String,
    },

    /// A fixed-position row has the wrong number of values
    #[error("Row '{row}' expects {expected} values, got {actual}")]
    RowArity {
        row: String,
        expected: usize,
        actual: usize,
    },

    /// Non-numeric text in a numeric field
    #[error("Field '{field}' is not a number: '{value}'")]
    NumericParse { field: String, value: String },

    /// Referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: i64 },

    /// Storage I/O failure
    #[error("Persistence error during {operation}: {reason}")]
    Persistence { operation: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LccaError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        LccaError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        LccaError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownMaterial error
    pub fn unknown_material(material: impl Into<String>, grade: impl Into<String>, unit: impl Into<String>) -> Self {
        LccaError::UnknownMaterial {
            material: material.into(),
            grade: grade.into(),
            unit: unit.into(),
        }
    }

    /// Create a RowArity error
    pub fn row_arity(row: impl Into<String>, expected: usize, actual: usize) -> Self {
        LccaError::RowArity {
            row: row.into(),
            expected,
            actual,
        }
    }

    /// Create a NumericParse error
    pub fn numeric_parse(field: impl Into<String>, value: impl Into<String>) -> Self {
        LccaError::NumericParse {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        LccaError::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// Create a Persistence error
    pub fn persistence(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        LccaError::Persistence {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the input layer should surface as a validation warning.
    ///
    /// These never leave a partial mutation behind.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LccaError::InvalidInput { .. }
                | LccaError::MissingField { .. }
                | LccaError::UnknownMaterial { .. }
                | LccaError::RowArity { .. }
                | LccaError::NumericParse { .. }
                | LccaError::NotFound { .. }
        )
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LccaError::Persistence { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LccaError::InvalidInput { .. } => "INVALID_INPUT",
            LccaError::MissingField { .. } => "MISSING_FIELD",
            LccaError::UnknownMaterial { .. } => "UNKNOWN_MATERIAL",
            LccaError::RowArity { .. } => "ROW_ARITY",
            LccaError::NumericParse { .. } => "NUMERIC_PARSE",
            LccaError::NotFound { .. } => "NOT_FOUND",
            LccaError::Persistence { .. } => "PERSISTENCE_ERROR",
            LccaError::Serialization { .. } => "SERIALIZATION_ERROR",
            LccaError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<rusqlite::Error> for LccaError {
    fn from(err: rusqlite::Error) -> Self {
        LccaError::persistence("sqlite", err.to_string())
    }
}

impl From<serde_json::Error> for LccaError {
    fn from(err: serde_json::Error) -> Self {
        LccaError::Serialization {
            reason: err.to_string(),
        }
    }
}
