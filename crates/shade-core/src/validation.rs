//! # Validation Module
//!
//! Input validation for values typed into the quote table and the editing
//! panels.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input handlers (shade-engine)                                │
//! │  ├── Disabled controls never publish                                   │
//! │  └── Unparseable ids/numbers are dropped                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field-level rules (ranges, lengths, allowed codes)                │
//! │  └── Called by QuoteData mutations before anything is written          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: AppState::check_invariants                                   │
//! │  └── Structural rules checked on the whole next state                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An empty (or all-whitespace) value means "clear the cell" and validates
//! to `None` for every optional column.

use crate::error::ValidationError;
use crate::MAX_ACCESSORY_COUNT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Smallest accepted width/height in millimetres.
pub const MIN_DIMENSION_MM: u32 = 250;

/// Largest accepted width/height in millimetres.
pub const MAX_DIMENSION_MM: u32 = 3300;

/// Largest accepted chain length in millimetres.
pub const MAX_CHAIN_MM: u32 = 5000;

/// Longest accepted location label.
pub const MAX_LOCATION_LEN: usize = 20;

/// Longest accepted fabric or color name.
pub const MAX_NAME_LEN: usize = 60;

/// Configurable limits applied on top of the fixed field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditLimits {
    pub max_location_len: usize,
    pub max_accessory_count: u32,
}

impl Default for EditLimits {
    fn default() -> Self {
        EditLimits {
            max_location_len: MAX_LOCATION_LEN,
            max_accessory_count: MAX_ACCESSORY_COUNT,
        }
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a width or height in millimetres.
///
/// ## Example
/// ```rust
/// use shade_core::validation::validate_dimension;
///
/// assert_eq!(validate_dimension("width", "1200").unwrap(), Some(1200));
/// assert_eq!(validate_dimension("width", "").unwrap(), None);
/// assert!(validate_dimension("width", "90").is_err());
/// assert!(validate_dimension("height", "abc").is_err());
/// ```
pub fn validate_dimension(field: &str, raw: &str) -> ValidationResult<Option<u32>> {
    parse_bounded(field, raw, MIN_DIMENSION_MM, MAX_DIMENSION_MM)
}

/// Validates a chain length in millimetres.
pub fn validate_chain(raw: &str) -> ValidationResult<Option<u32>> {
    parse_bounded("chain", raw, 1, MAX_CHAIN_MM)
}

/// Validates an accessory count against a configured ceiling.
///
/// The ceiling itself may never exceed [`MAX_ACCESSORY_COUNT`].
pub fn validate_accessory_count(count: u32, max: u32) -> ValidationResult<u32> {
    let max = max.min(MAX_ACCESSORY_COUNT);
    if count > max {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 0,
            max: max as i64,
        });
    }
    Ok(count)
}

fn parse_bounded(field: &str, raw: &str, min: u32, max: u32) -> ValidationResult<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value: u32 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a whole number", raw),
    })?;

    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: min as i64,
            max: max as i64,
        });
    }

    Ok(Some(value))
}

// =============================================================================
// Text Validators
// =============================================================================

/// Validates a free-text name (fabric, color).
pub fn validate_name(field: &str, raw: &str) -> ValidationResult<Option<String>> {
    validate_text(field, raw, MAX_NAME_LEN)
}

/// Validates a location label.
pub fn validate_location(raw: &str, max_len: usize) -> ValidationResult<Option<String>> {
    validate_text("location", raw, max_len)
}

/// Validates a required free-text name; empty values are rejected.
pub fn require_name(field: &str, raw: &str) -> ValidationResult<String> {
    validate_name(field, raw)?.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })
}

fn validate_text(field: &str, raw: &str, max_len: usize) -> ValidationResult<Option<String>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max_len {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: max_len,
        });
    }
    Ok(Some(value.to_string()))
}

/// Validates a fabric type code (e.g. `B1`, `SN`, `LF`).
///
/// ## Rules
/// - 1 to 4 characters
/// - ASCII letters and digits only, stored upper-case
///
/// ## Example
/// ```rust
/// use shade_core::validation::validate_fabric_type;
///
/// assert_eq!(validate_fabric_type("b2").unwrap(), Some("B2".to_string()));
/// assert!(validate_fabric_type("B-2").is_err());
/// ```
pub fn validate_fabric_type(raw: &str) -> ValidationResult<Option<String>> {
    let code = raw.trim();
    if code.is_empty() {
        return Ok(None);
    }
    if code.len() > 4 {
        return Err(ValidationError::TooLong {
            field: "fabricType".to_string(),
            max: 4,
        });
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "fabricType".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }
    Ok(Some(code.to_ascii_uppercase()))
}

/// Validates a one-of option code (over/under, left/right, dual, winder, motor).
pub fn validate_option(field: &str, raw: &str, allowed: &[&str]) -> ValidationResult<Option<String>> {
    let value = raw.trim().to_ascii_uppercase();
    if value.is_empty() {
        return Ok(None);
    }
    if !allowed.contains(&value.as_str()) {
        return Err(ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        });
    }
    Ok(Some(value))
}

// =============================================================================
// Unit Tests
// =============================================================================
