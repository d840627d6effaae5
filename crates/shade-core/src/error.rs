//! # Error Types
//!
//! Domain-specific error types for shade-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shade-core errors (this file)                                         │
//! │  ├── CoreError        - Rejected quote/UI mutations                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shade-engine errors (separate crate)                                  │
//! │  └── EngineError      - Wiring, config, subscriber faults              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → console exit code   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `CoreError` always means "the mutation was rejected and nothing changed".
//! Callers never have to roll anything back.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Rejected mutations of the quote or UI state.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Row index does not exist in the current product table.
    #[error("Row {row} out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// Product key is not in the catalogue.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The operation needs at least one selected row.
    #[error("No rows selected")]
    NoRowsSelected,

    /// Row has no light filter applied, so there is nothing to remove.
    #[error("Row {0} has no light filter")]
    NotLightFiltered(usize),

    /// The last row of a table cannot be deleted.
    #[error("Cannot delete the last row of a table")]
    LastRow,

    /// The operation belongs to a mode that is not active.
    #[error("Mode not active: {0}")]
    ModeNotActive(String),

    /// The operation writes into a target cell but none is selected.
    #[error("No target cell selected")]
    NoTargetCell,

    /// Table is full.
    #[error("Table cannot have more than {max} rows")]
    TableFull { max: usize },

    /// The quote data breaks a structural invariant.
    ///
    /// ## When This Occurs
    /// - Externally supplied starting data names a missing product
    /// - Row metadata points at rows that do not exist
    #[error("Invariant violated: {0}")]
    InvariantViolated(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., non-numeric width).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RowOutOfRange { row: 7, len: 3 };
        assert_eq!(err.to_string(), "Row 7 out of range (table has 3 rows)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "fabric".to_string(),
        };
        assert_eq!(err.to_string(), "fabric is required");

        let err = ValidationError::OutOfRange {
            field: "width".to_string(),
            min: 250,
            max: 3300,
        };
        assert_eq!(err.to_string(), "width must be between 250 and 3300");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "color".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
