//! # Form Commands
//!
//! Quantity and customer field entry. Nothing here touches the network or
//! the disk; the form lives only as long as the session.

use orderpad_core::CustomerField;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, FormState, OrderForm};

/// Records the quantity typed next to a product.
///
/// ## Behavior
/// - Digits: stored and exported as typed ("007" stays "007")
/// - Empty: clears the entry
/// - Anything else: rejected, previous value kept
///
/// ## Errors
/// - `NOT_FOUND` if the code is not in the catalog
/// - `VALIDATION_ERROR` for non-numeric input
pub fn set_quantity(
    catalog: &CatalogState,
    form: &FormState,
    code: &str,
    input: &str,
) -> Result<Option<String>, ApiError> {
    debug!(code = %code, input = %input, "set_quantity command");

    if !catalog.catalog().contains(code) {
        return Err(ApiError::not_found("Product", code));
    }

    form.with_form_mut(|f| -> Result<Option<String>, ApiError> {
        f.quantities.set(code, input)?;
        Ok(f.quantities.ordered_quantity(code).map(str::to_string))
    })
}

/// Replaces one customer field.
pub fn set_customer_field(
    form: &FormState,
    field: CustomerField,
    value: &str,
) -> Result<(), ApiError> {
    debug!(?field, "set_customer_field command");
    form.with_form_mut(|f| f.customer.set(field, value));
    Ok(())
}

/// Returns a copy of the current form.
pub fn get_form(form: &FormState) -> OrderForm {
    form.snapshot()
}

/// Clears all quantities and customer fields.
pub fn reset_form(form: &FormState) {
    debug!("reset_form command");
    form.with_form_mut(OrderForm::clear);
}
