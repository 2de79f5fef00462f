//! # Validation Module
//!
//! Input validation utilities for Orderpad.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (apps/cli)                                        │
//! │  └── Every keystroke-equivalent goes through THIS MODULE               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: QuantityMap                                                  │
//! │  └── Only stores strings that passed validate_quantity_input           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Export                                                       │
//! │  └── Writes positive entries as typed, skips the rest                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use orderpad_core::validation::validate_quantity_input;
//!
//! assert!(validate_quantity_input("12").is_ok());
//! assert!(validate_quantity_input("").is_ok());
//! assert!(validate_quantity_input("1.5").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity
// =============================================================================

/// Validates raw quantity input as typed by the user.
///
/// ## Rules
/// - Only ASCII digits are accepted (no sign, no decimal point, no spaces)
/// - The empty string is accepted and means "no quantity"
/// - There is no upper bound; the text is kept and exported as typed
pub fn validate_quantity_input(input: &str) -> ValidationResult<()> {
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Returns true if `raw` is a digit string with a value above zero.
///
/// Works on the text itself, so arbitrarily long inputs never overflow.
pub fn is_positive_quantity(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit()) && raw.bytes().any(|b| b != b'0')
}

// =============================================================================
// Product Fields
// =============================================================================

/// Validates a product code used as a quantity key.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Location
// =============================================================================

/// Validates a coordinate pair in decimal degrees.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> ValidationResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: -90,
            max: 90,
        });
    }

    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::OutOfRange {
            field: "longitude".to_string(),
            min: -180,
            max: 180,
        });
    }

    Ok(())
}
