//! # Catalog Commands
//!
//! Read-only views of the loaded products.

use orderpad_core::Product;
use serde::Serialize;
use tracing::debug;

use crate::state::{CatalogState, FormState};

/// One row of the product list, with whatever the user typed next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub code: String,
    pub name: String,
    pub description: String,
    pub quantity: String,
}

impl ProductRow {
    fn new(product: &Product, quantity: Option<&str>) -> Self {
        ProductRow {
            code: product.code.clone(),
            name: product.display_name().to_string(),
            description: product.description.clone(),
            quantity: quantity.unwrap_or_default().to_string(),
        }
    }
}

/// Lists the catalog in its original order.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │  001  Toy Car        Red die-cast car       [ 2 ]    │
/// │  002  Teddy Bear     Soft plush bear        [   ]    │
/// │  ...                                                 │
/// └──────────────────────────────────────────────────────┘
/// ```
pub fn list_products(catalog: &CatalogState, form: &FormState) -> Vec<ProductRow> {
    debug!("list_products command");

    form.with_form(|f| {
        catalog
            .catalog()
            .products()
            .iter()
            .map(|p| ProductRow::new(p, f.quantities.raw(&p.code)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderpad_core::Catalog;

    #[test]
    fn test_list_products_keeps_order_and_quantities() {
        let catalog = CatalogState::new(Catalog::builtin(), None);
        let form = FormState::new();
        form.with_form_mut(|f| f.quantities.set("002", "4")).unwrap();

        let rows = list_products(&catalog, &form);

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].code, "001");
        assert_eq!(rows[0].quantity, "");
        assert_eq!(rows[1].code, "002");
        assert_eq!(rows[1].quantity, "4");
    }
}
