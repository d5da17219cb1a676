//! # Error Types
//!
//! Structured error types for pricing_core. The pricing engine itself never
//! fails (numeric edge cases surface as non-finite figures), so these errors
//! come from the collaborators around it: workbook lookups, caller-side
//! validation and file I/O.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::errors::{PricingError, PricingResult};
//!
//! fn check_hours_per_day(hours: f64) -> PricingResult<()> {
//!     if hours <= 0.0 {
//!         return Err(PricingError::invalid_input(
//!             "hoursPerDay",
//!             hours.to_string(),
//!             "Printer must run a positive number of hours per day",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_hours_per_day(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pricing_core operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Structured error type for workbook, validation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PricingError {
    /// An input value is out of range for pricing
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A referenced record (printer, project, filament...) does not exist
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: String, id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl PricingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        PricingError::MissingField {
            field: field.into(),
        }
    }

    /// Create a RecordNotFound error
    pub fn record_not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        PricingError::RecordNotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "INVALID_INPUT",
            PricingError::MissingField { .. } => "MISSING_FIELD",
            PricingError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            PricingError::FileError { .. } => "FILE_ERROR",
            PricingError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PricingError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        PricingError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PricingError::invalid_input("hoursPerDay", "0", "Must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: PricingError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PricingError::missing_field("name").error_code(), "MISSING_FIELD");
        assert_eq!(PricingError::record_not_found("Printer", 42).error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_record_not_found_message() {
        let error = PricingError::record_not_found("Project", 1700000000000u64);
        assert_eq!(error.to_string(), "Project not found: 1700000000000");
    }
}
