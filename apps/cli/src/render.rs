//! Plain-text rendering of command results.

use std::fmt::Write;

use orderpad_core::{CustomerField, LOCATION_UNAVAILABLE, MISSING_FIELD};

use crate::commands::catalog::ProductRow;
use crate::commands::export::ExportResponse;
use crate::state::{CatalogState, OrderForm};

pub fn product_table(rows: &[ProductRow]) -> String {
    let code_width = rows.iter().map(|r| r.code.len()).max().unwrap_or(0);
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{:<cw$}  {:<nw$}  {}  [{}]",
            row.code,
            row.name,
            row.description,
            row.quantity,
            cw = code_width,
            nw = name_width,
        );
    }
    out
}

/// The order as it would be exported, without writing anything.
pub fn order_summary(catalog: &CatalogState, form: &OrderForm) -> String {
    let mut out = String::new();

    let ordered: Vec<_> = catalog
        .catalog()
        .products()
        .iter()
        .filter_map(|p| {
            form.quantities
                .ordered_quantity(&p.code)
                .map(|qty| (p, qty))
        })
        .collect();

    if ordered.is_empty() {
        out.push_str("No products ordered yet\n");
    }
    for (product, qty) in ordered {
        let _ = writeln!(out, "{} x{}  {}", product.code, qty, product.display_name());
    }

    let fields = [
        ("Store", CustomerField::Store),
        ("VAT", CustomerField::Vat),
        ("Notes", CustomerField::Notes),
    ];
    for (label, field) in fields {
        let value = match form.customer.get(field) {
            "" => MISSING_FIELD,
            value => value,
        };
        let _ = writeln!(out, "{}: {}", label, value);
    }

    match catalog.location() {
        Some(loc) => {
            let _ = writeln!(out, "Location: {}, {}", loc.latitude, loc.longitude);
        }
        None => {
            let _ = writeln!(out, "Location: {}", LOCATION_UNAVAILABLE);
        }
    }

    out
}

pub fn export_result(response: &ExportResponse) -> String {
    match &response.notice {
        Some(notice) => format!("{}\n", notice),
        None if response.fallback => {
            format!("Could not save {}, shared it instead\n", response.file_name)
        }
        None => format!("Shared {}\n", response.file_name),
    }
}
