//! # Catalog
//!
//! The list of orderable products, parsed from the sheet the field team
//! maintains (or taken from the built-in list).
//!
//! ## Parsing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product Code,Product Description,Product Name     ◄── header row       │
//! │  001,Toy Car,Car                                    ✅ kept             │
//! │  002,Kite,                                          ✅ kept (no name)   │
//! │  ,Orphan description                                ❌ skipped (code)   │
//! │     ,Blank code                                     ❌ skipped (code)   │
//! │  004,                                               ❌ skipped (desc)   │
//! │  001,Toy Car (duplicate)                            ❌ skipped (dup)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A sheet without the two required header columns is rejected as a whole.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::validate_product_code;
use crate::{CODE_COLUMN, DESCRIPTION_COLUMN, NAME_COLUMN};

/// An ordered, de-duplicated product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    products: Vec<Product>,

    /// Rows that were discarded while parsing.
    skipped: usize,
}

impl Catalog {
    /// Builds a catalog from already-parsed products.
    ///
    /// Products with a blank code or description, and repeated codes, are
    /// dropped the same way [`Catalog::from_csv`] drops them.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Catalog::default();
        let mut seen = HashSet::new();

        for product in products {
            catalog.push_unique(product, &mut seen);
        }

        catalog
    }

    /// Parses CSV text whose first row names the columns.
    ///
    /// ## Errors
    /// `CoreError::CatalogFormat` when the header cannot be read or lacks
    /// `Product Code` / `Product Description`. Bad data rows never fail the
    /// parse; they are counted in [`Catalog::skipped`].
    pub fn from_csv(text: &str) -> CoreResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| CoreError::CatalogFormat(format!("unreadable header row: {}", e)))?
            .clone();

        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let code_idx = column(CODE_COLUMN)
            .ok_or_else(|| CoreError::CatalogFormat(format!("missing column '{}'", CODE_COLUMN)))?;
        let desc_idx = column(DESCRIPTION_COLUMN).ok_or_else(|| {
            CoreError::CatalogFormat(format!("missing column '{}'", DESCRIPTION_COLUMN))
        })?;
        let name_idx = column(NAME_COLUMN);

        let mut catalog = Catalog::default();
        let mut seen = HashSet::new();

        for record in reader.records() {
            let Ok(record) = record else {
                catalog.skipped += 1;
                continue;
            };

            let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
            let name = name_idx
                .and_then(|idx| record.get(idx))
                .filter(|n| !n.is_empty())
                .map(str::to_string);

            let product = Product {
                code: field(code_idx),
                description: field(desc_idx),
                name,
            };

            catalog.push_unique(product, &mut seen);
        }

        Ok(catalog)
    }

    /// The static product list used when no sheet is configured.
    pub fn builtin() -> Self {
        Catalog::new([
            Product::new("001", "Toy Car").with_name("Car"),
            Product::new("002", "Wooden Train Set").with_name("Train"),
            Product::new("003", "Building Blocks 100pc").with_name("Blocks"),
            Product::new("004", "Plush Teddy Bear").with_name("Teddy"),
            Product::new("005", "Jigsaw Puzzle 500pc").with_name("Puzzle"),
            Product::new("006", "Skipping Rope").with_name("Rope"),
            Product::new("007", "Crayon Box 24 colours").with_name("Crayons"),
            Product::new("008", "Kite").with_name("Kite"),
        ])
    }

    fn push_unique(&mut self, product: Product, seen: &mut HashSet<String>) {
        if validate_product_code(&product.code).is_err() || product.description.trim().is_empty() {
            self.skipped += 1;
            return;
        }

        if !seen.insert(product.code.clone()) {
            self.skipped += 1;
            return;
        }

        self.products.push(product);
    }

    /// Products in sheet order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks a product up by code.
    pub fn get(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Number of rows discarded while building the catalog.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
