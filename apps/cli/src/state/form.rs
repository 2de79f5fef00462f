//! # Form State
//!
//! Customer fields and quantities for the order being entered.
//!
//! ## Form Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User Action               Command                  Form Change         │
//! │  ───────────               ───────                  ───────────         │
//! │  Type in Qty box ────────► set_quantity() ────────► quantities[code]    │
//! │  Type store / VAT / notes► set_customer_field() ──► customer.<field>    │
//! │  Start over ─────────────► reset_form() ──────────► cleared             │
//! │  Export ─────────────────► export_order() ────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use orderpad_core::{CustomerInfo, QuantityMap};
use serde::Serialize;

/// The order being entered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderForm {
    pub customer: CustomerInfo,
    pub quantities: QuantityMap,
}

impl OrderForm {
    pub fn clear(&mut self) {
        self.customer = CustomerInfo::default();
        self.quantities.clear();
    }
}

/// Shared, lock-protected order form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    form: Arc<Mutex<OrderForm>>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the form.
    pub fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderForm) -> R,
    {
        let form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        f(&form)
    }

    /// Executes a function with write access to the form.
    pub fn with_form_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderForm) -> R,
    {
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut form)
    }

    /// Copies the current form out, releasing the lock immediately.
    pub fn snapshot(&self) -> OrderForm {
        self.with_form(OrderForm::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_detached() {
        let state = FormState::new();
        state.with_form_mut(|f| f.quantities.set("001", "2")).unwrap();

        let snapshot = state.snapshot();
        state.with_form_mut(|f| f.quantities.set("001", "5")).unwrap();

        assert_eq!(snapshot.quantities.ordered_quantity("001"), Some("2"));
        let current = state.with_form(|f| f.quantities.raw("001").map(str::to_string));
        assert_eq!(current.as_deref(), Some("5"));
    }

    #[test]
    fn test_clear() {
        let state = FormState::new();
        state.with_form_mut(|f| {
            f.customer.store = "Acme".into();
            f.quantities.set("001", "2").unwrap();
            f.clear();
        });

        let form = state.snapshot();
        assert!(form.customer.store.is_empty());
        assert!(form.quantities.is_empty());
    }
}
