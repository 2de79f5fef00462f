//! # Platform Error Types
//!
//! Error types for everything that talks to the outside world.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Platform Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Startup        │  │  Permissions    │  │  Export                 │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Initialization │  │  PermissionDen. │  │  WriteFailure  ──► share│ │
//! │  │  (blocks ready) │  │  (degrades)     │  │  ShareFailure  (final)  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │  Configuration  │  │  Location       │                              │
//! │  │                 │  │                 │                              │
//! │  │  InvalidConfig  │  │  Unavailable    │                              │
//! │  │  ConfigLoad...  │  │  (non-fatal)    │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate retries. Each error is reported once at the boundary
//! of the operation that raised it.

use orderpad_core::CoreError;
use thiserror::Error;

/// Result type alias for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Which permission a prompt was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Location,
    Storage,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Location => write!(f, "Location"),
            Permission::Storage => write!(f, "Storage"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    // =========================================================================
    // Startup Errors
    // =========================================================================
    /// The catalog could not be fetched or parsed.
    #[error("Failed to load app data: {0}")]
    Initialization(String),

    // =========================================================================
    // Permission Errors
    // =========================================================================
    /// The user (or the host) refused a permission prompt.
    #[error("{0} permission is required")]
    PermissionDenied(Permission),

    // =========================================================================
    // Export Errors
    // =========================================================================
    /// Saving the export to the device failed.
    #[error("Could not save {file_name}: {reason}")]
    WriteFailure { file_name: String, reason: String },

    /// The share action failed. This is the last resort, nothing follows it.
    #[error("Could not share the export: {0}")]
    ShareFailure(String),

    // =========================================================================
    // Location Errors
    // =========================================================================
    /// No position could be read.
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for PlatformError {
    fn from(err: reqwest::Error) -> Self {
        PlatformError::Initialization(err.to_string())
    }
}

impl From<toml::de::Error> for PlatformError {
    fn from(err: toml::de::Error) -> Self {
        PlatformError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for PlatformError {
    fn from(err: toml::ser::Error) -> Self {
        PlatformError::ConfigSaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for PlatformError {
    fn from(err: url::ParseError) -> Self {
        PlatformError::InvalidConfig(format!("invalid catalog URL: {}", err))
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl PlatformError {
    /// Returns true if the export path should fall back to sharing.
    pub fn triggers_share_fallback(&self) -> bool {
        matches!(
            self,
            PlatformError::WriteFailure { .. }
                | PlatformError::PermissionDenied(Permission::Storage)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PlatformError::PermissionDenied(Permission::Storage).to_string(),
            "Storage permission is required"
        );

        let err = PlatformError::WriteFailure {
            file_name: "order_x.csv".into(),
            reason: "disk full".into(),
        };
        assert_eq!(err.to_string(), "Could not save order_x.csv: disk full");
    }

    #[test]
    fn test_categories() {
        assert!(PlatformError::PermissionDenied(Permission::Storage).triggers_share_fallback());
        assert!(!PlatformError::PermissionDenied(Permission::Location).triggers_share_fallback());
        assert!(!PlatformError::ShareFailure("closed".into()).triggers_share_fallback());
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: PlatformError = CoreError::NoProducts.into();
        assert_eq!(err.to_string(), CoreError::NoProducts.to_string());
    }
}
