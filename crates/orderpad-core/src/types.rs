//! # Domain Types
//!
//! Core domain types used throughout Orderpad.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  CustomerInfo   │   │    Location     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (key)     │   │  store          │   │  latitude       │       │
//! │  │  description    │   │  vat            │   │  longitude      │       │
//! │  │  name?          │   │  notes          │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Product: immutable once loaded, sourced from the catalog sheet        │
//! │  CustomerInfo: free text, every field optional (empty by default)      │
//! │  Location: captured once at startup, never refreshed                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product code - the business key quantities are stored under.
    pub code: String,

    /// Description shown to the user and written to the export.
    pub description: String,

    /// Optional short name (only some catalogs carry one).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Product {
    /// Creates a product without a short name.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Product {
            code: code.into(),
            description: description.into(),
            name: None,
        }
    }

    /// Attaches a short name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label used when listing the product: the name if present,
    /// otherwise the description.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.description)
    }
}

// =============================================================================
// Customer Info
// =============================================================================

/// Which customer field a piece of user input belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerField {
    Store,
    Vat,
    Notes,
}

impl std::str::FromStr for CustomerField {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "store" | "store_name" => Ok(CustomerField::Store),
            "vat" | "tax_id" => Ok(CustomerField::Vat),
            "notes" | "note" => Ok(CustomerField::Notes),
            other => Err(crate::ValidationError::InvalidFormat {
                field: "customer field".to_string(),
                reason: format!("unknown field '{}', expected store, vat or notes", other),
            }),
        }
    }
}

/// Customer metadata attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerInfo {
    /// Store name.
    pub store: String,

    /// VAT / tax identification number.
    pub vat: String,

    /// Free-form notes (may span several lines).
    pub notes: String,
}

impl CustomerInfo {
    /// Replaces one field.
    pub fn set(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CustomerField::Store => self.store = value,
            CustomerField::Vat => self.vat = value,
            CustomerField::Notes => self.notes = value,
        }
    }

    /// Reads one field.
    pub fn get(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Store => &self.store,
            CustomerField::Vat => &self.vat,
            CustomerField::Notes => &self.notes,
        }
    }
}

// =============================================================================
// Location
// =============================================================================

/// A one-shot geolocation reading in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }
}
