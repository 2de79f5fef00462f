//! # API Error Type
//!
//! Unified error type for CLI commands. Every failure a command can hit
//! ends up here and is shown to the user as a dismissible notice.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Orderpad                               │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │  CoreError ────────┼──► ApiError { code, title, message } ──► Notice    │
//! │  PlatformError ────┘                                                    │
//! │                                                                         │
//! │  e.g. CoreError::NoProducts                                             │
//! │       ──► { code: NO_PRODUCTS,                                          │
//! │             title: "No Products",                                       │
//! │             message: "Please add quantities to at least one product" }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use orderpad_core::{CoreError, ValidationError};
use orderpad_platform::PlatformError;
use serde::Serialize;

/// API error returned from commands.
///
/// ## Serialization
/// With `--json` this is what a failed command prints:
/// ```json
/// {
///   "code": "NO_PRODUCTS",
///   "title": "No Products",
///   "message": "Please add quantities to at least one product"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Notice title
    pub title: String,

    /// Human-readable message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog fetch/parse failed, the app cannot start
    Initialization,

    /// Export attempted with nothing ordered
    NoProducts,

    /// Input validation failed
    ValidationError,

    /// Unknown product code
    NotFound,

    /// A permission prompt was refused
    PermissionDenied,

    /// Save and share both failed
    ExportFailed,

    /// Another export is still running
    ExportInProgress,

    /// Configuration could not be loaded
    ConfigError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, title: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, "Invalid Input", message)
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            "Not Found",
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn export_in_progress() -> Self {
        ApiError::new(
            ErrorCode::ExportInProgress,
            "Exporting...",
            "An export is already in progress",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, "Error", message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoProducts => ApiError::new(
                ErrorCode::NoProducts,
                "No Products",
                "Please add quantities to at least one product",
            ),
            CoreError::CatalogFormat(reason) => {
                tracing::error!(reason = %reason, "Catalog rejected");
                ApiError::new(
                    ErrorCode::Initialization,
                    "Initialization Error",
                    "Failed to load app data",
                )
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<PlatformError> for ApiError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::Initialization(e) => {
                tracing::error!(error = %e, "Failed to load products");
                ApiError::new(
                    ErrorCode::Initialization,
                    "Initialization Error",
                    "Failed to load app data",
                )
            }
            PlatformError::PermissionDenied(permission) => ApiError::new(
                ErrorCode::PermissionDenied,
                "Permission Denied",
                format!("{} permission is required", permission),
            ),
            e @ (PlatformError::WriteFailure { .. } | PlatformError::ShareFailure(_)) => {
                tracing::error!(error = %e, "Export failed");
                ApiError::new(ErrorCode::ExportFailed, "Export Failed", e.to_string())
            }
            PlatformError::LocationUnavailable(reason) => ApiError::new(
                ErrorCode::PermissionDenied,
                "Location Unavailable",
                reason,
            ),
            e @ (PlatformError::InvalidConfig(_)
            | PlatformError::ConfigLoadFailed(_)
            | PlatformError::ConfigSaveFailed(_)) => {
                ApiError::new(ErrorCode::ConfigError, "Configuration Error", e.to_string())
            }
            PlatformError::Core(e) => e.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

impl std::error::Error for ApiError {}
