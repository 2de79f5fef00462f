//! # Commands Module
//!
//! Every operation the user can trigger from the terminal.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, Notice)
//! ├── catalog.rs  ◄─── Product listing
//! ├── form.rs     ◄─── Quantity and customer field entry
//! └── export.rs   ◄─── Build + export the order CSV
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &CatalogState)
//!
//! // Needs the catalog (code lookup) and the form
//! fn set_quantity(catalog: &CatalogState, form: &FormState, ...)
//!
//! // Needs everything plus the exporter
//! async fn export_order(catalog, form, export, exporter)
//! ```

pub mod catalog;
pub mod export;
pub mod form;

use serde::Serialize;

use crate::error::ApiError;

/// A dismissible message shown after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        Notice::new(err.title.clone(), err.message.clone())
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
