//! # Error Types
//!
//! Domain-specific error types for orderpad-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderpad-core errors (this file)                                      │
//! │  ├── CoreError        - Order and catalog failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  orderpad-platform errors (separate crate)                             │
//! │  └── PlatformError    - Fetch, permission, write and share failures    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - The notice the user sees                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PlatformError → ApiError → User   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core order logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog product has a positive quantity.
    ///
    /// ## When This Occurs
    /// - The quantity map is empty
    /// - Every entry is empty or zero
    /// - Every entry refers to a code that is not in the catalog
    #[error("No products have a quantity greater than zero")]
    NoProducts,

    /// The catalog text could not be understood at all.
    ///
    /// Individual bad rows are skipped, this is only raised when the sheet
    /// itself is unusable (missing header column, unreadable header).
    #[error("Invalid catalog: {0}")]
    CatalogFormat(String),

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

    /// Invalid format (e.g. letters typed into a quantity).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::NoProducts.to_string(),
            "No products have a quantity greater than zero"
        );

        let err = CoreError::CatalogFormat("missing column 'Product Code'".to_string());
        assert_eq!(err.to_string(), "Invalid catalog: missing column 'Product Code'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: code is required");
    }
}
