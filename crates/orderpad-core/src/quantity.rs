//! # Quantity Map
//!
//! Order quantities as the user typed them, keyed by product code.
//!
//! ## Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types in the Qty box for product 001                              │
//! │                                                                         │
//! │  "3"   ──► set("001", "3")   ──► entry = "3"     ordered: 3            │
//! │  "3x"  ──► set("001", "3x")  ──► rejected        entry stays "3"       │
//! │  "0"   ──► set("001", "0")   ──► entry = "0"     ordered: none         │
//! │  ""    ──► set("001", "")    ──► entry removed   ordered: none         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The raw text is kept (rather than a number) so the form can show back
//! exactly what was typed, leading zeros included.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::validation::{
    is_positive_quantity, validate_product_code, validate_quantity_input, ValidationResult,
};

/// User-entered order quantities keyed by product code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantityMap {
    entries: HashMap<String, String>,
}

impl QuantityMap {
    /// Creates an empty quantity map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the quantity typed for a product.
    ///
    /// ## Behavior
    /// - Digits only: stored as typed
    /// - Empty input: removes the entry
    /// - Anything else: rejected, the previous entry is kept
    pub fn set(&mut self, code: &str, input: &str) -> ValidationResult<()> {
        validate_product_code(code)?;

        validate_quantity_input(input)?;

        if input.is_empty() {
            self.entries.remove(code);
        } else {
            self.entries.insert(code.to_string(), input.to_string());
        }

        Ok(())
    }

    /// Returns the raw text entered for a product, if any.
    pub fn raw(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Returns the quantity text for a product that is actually ordered.
    ///
    /// Absent, empty and zero entries all mean "not ordered" and return `None`.
    /// Ordered entries come back exactly as typed, leading zeros included.
    pub fn ordered_quantity(&self, code: &str) -> Option<&str> {
        self.raw(code).filter(|raw| is_positive_quantity(raw))
    }

    /// Number of stored entries (including zeros).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
