//! # Order Export
//!
//! Turns the form (catalog + quantities + customer + location) into the
//! CSV text that leaves the device, and names the file it is saved under.
//!
//! ## Export Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Code,Description,Quantity          ◄── header                          │
//! │  001,Toy Car,3                      ◄── one line per ordered product    │
//! │  004,Plush Teddy Bear,12                (catalog order)                 │
//! │                                     ◄── blank separator                 │
//! │  Store:,Acme                        ◄── customer footer                 │
//! │  VAT:,N/A                               (N/A when empty)                │
//! │  Notes:,N/A                                                             │
//! │  Latitude:,37.7749                  ◄── location footer                 │
//! │  Longitude:,-122.4194                   ("Not available" when absent)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are joined with `\n` and there is no trailing newline.
//!
//! ## Field Quoting
//! A field containing a comma, double quote, CR or LF is wrapped in double
//! quotes with inner quotes doubled (RFC 4180). Every other field is written
//! verbatim, so ordinary orders come out exactly as plain comma-joined text.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::quantity::QuantityMap;
use crate::types::{CustomerInfo, Location, Product};
use crate::{LOCATION_UNAVAILABLE, MISSING_FIELD};

/// Header line of every export.
pub const EXPORT_HEADER: &str = "Code,Description,Quantity";

// =============================================================================
// Export Artifact
// =============================================================================

/// A finished export: the CSV text and the file name it goes out under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub file_name: String,
    pub content: String,

    /// Number of product lines in the export body.
    pub line_items: usize,
}

impl ExportArtifact {
    /// Builds the artifact for an order snapshot taken at `timestamp`.
    ///
    /// ## Errors
    /// `CoreError::NoProducts` when nothing has a positive quantity.
    pub fn build(
        products: &[Product],
        quantities: &QuantityMap,
        customer: &CustomerInfo,
        location: Option<Location>,
        timestamp: DateTime<Utc>,
    ) -> CoreResult<Self> {
        let (content, line_items) = render(products, quantities, customer, location)?;

        Ok(ExportArtifact {
            file_name: export_file_name(timestamp),
            content,
            line_items,
        })
    }
}

// =============================================================================
// CSV Construction
// =============================================================================

/// Builds the order CSV.
///
/// Products are written in the order given; only products whose quantity
/// entry is a positive integer are included, with the quantity as typed.
pub fn build_order_csv(
    products: &[Product],
    quantities: &QuantityMap,
    customer: &CustomerInfo,
    location: Option<Location>,
) -> CoreResult<String> {
    render(products, quantities, customer, location).map(|(content, _)| content)
}

fn render(
    products: &[Product],
    quantities: &QuantityMap,
    customer: &CustomerInfo,
    location: Option<Location>,
) -> CoreResult<(String, usize)> {
    let mut lines = vec![EXPORT_HEADER.to_string()];

    lines.extend(products.iter().filter_map(|product| {
        quantities.ordered_quantity(&product.code).map(|qty| {
            format!(
                "{},{},{}",
                csv_field(&product.code),
                csv_field(&product.description),
                qty
            )
        })
    }));

    let line_items = lines.len() - 1;
    if line_items == 0 {
        return Err(CoreError::NoProducts);
    }

    lines.push(String::new());
    lines.push(footer_line("Store:", or_missing(&customer.store)));
    lines.push(footer_line("VAT:", or_missing(&customer.vat)));
    lines.push(footer_line("Notes:", or_missing(&customer.notes)));

    match location {
        Some(loc) => {
            lines.push(footer_line("Latitude:", &loc.latitude.to_string()));
            lines.push(footer_line("Longitude:", &loc.longitude.to_string()));
        }
        None => {
            lines.push(footer_line("Latitude:", LOCATION_UNAVAILABLE));
            lines.push(footer_line("Longitude:", LOCATION_UNAVAILABLE));
        }
    }

    Ok((lines.join("\n"), line_items))
}

fn footer_line(label: &str, value: &str) -> String {
    format!("{},{}", label, csv_field(value))
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() {
        MISSING_FIELD
    } else {
        value
    }
}

/// Quotes a single CSV field when it would otherwise break the row.
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

// =============================================================================
// File Naming
// =============================================================================

/// Names the export file after the moment it was produced.
///
/// `order_` + ISO 8601 UTC timestamp with milliseconds, with `:` and `.`
/// replaced by `-`, + `.csv`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use orderpad_core::export_file_name;
///
/// let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap();
/// assert_eq!(export_file_name(ts), "order_2024-05-01T10-20-30-000Z.csv");
/// ```
pub fn export_file_name(timestamp: DateTime<Utc>) -> String {
    let iso = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("order_{}.csv", iso.replace([':', '.'], "-"))
}
