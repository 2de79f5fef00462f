//! # orderpad-core: Pure Order Logic for Orderpad
//!
//! This crate holds everything about an order that can be decided without
//! touching the outside world: the product catalog, the quantities a field
//! user typed, and the CSV text that leaves the device.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orderpad Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (terminal form)                     │   │
//! │  │    Products ──► Quantities ──► Customer ──► Export              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               orderpad-platform (I/O)                           │   │
//! │  │    HTTP catalog, location, file store, share sheet              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ orderpad-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │ quantity  │  │  export   │  │   │
//! │  │   │  Product  │  │  Catalog  │  │QuantityMap│  │ CSV text  │  │   │
//! │  │   │  Customer │  │ from_csv  │  │  set/get  │  │ file name │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CustomerInfo, Location, ExportArtifact)
//! - [`catalog`] - Catalog parsing and the built-in product list
//! - [`quantity`] - User-entered quantities keyed by product code
//! - [`export`] - CSV construction and export file naming
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use orderpad_core::{build_order_csv, Catalog, CustomerInfo, QuantityMap};
//!
//! let catalog = Catalog::from_csv("Product Code,Product Description\n001,Toy Car\n").unwrap();
//! let mut quantities = QuantityMap::new();
//! quantities.set("001", "3").unwrap();
//!
//! let customer = CustomerInfo { store: "Acme".into(), ..Default::default() };
//! let csv = build_order_csv(catalog.products(), &quantities, &customer, None).unwrap();
//! assert!(csv.starts_with("Code,Description,Quantity\n001,Toy Car,3\n"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod export;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use export::{build_order_csv, export_file_name, ExportArtifact};
pub use quantity::QuantityMap;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Header column holding the product code in the catalog sheet.
pub const CODE_COLUMN: &str = "Product Code";

/// Header column holding the product description in the catalog sheet.
pub const DESCRIPTION_COLUMN: &str = "Product Description";

/// Optional header column holding a short product name.
pub const NAME_COLUMN: &str = "Product Name";

/// Placeholder written for empty customer fields.
pub const MISSING_FIELD: &str = "N/A";

/// Placeholder written when no location was captured.
pub const LOCATION_UNAVAILABLE: &str = "Not available";

/// Name of the album (and folder) exported orders are filed under.
pub const ORDERS_ALBUM: &str = "Orders";
