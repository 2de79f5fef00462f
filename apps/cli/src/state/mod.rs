//! # State Module
//!
//! Application state for an order-entry session, split by concern the same
//! way commands consume it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  FormState   │  │   ExportState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Catalog     │  │  Arc<Mutex<  │  │  pending flag    │              │
//! │  │  Location?   │  │   OrderForm  │  │  (one export at  │              │
//! │  │              │  │  >>          │  │   a time)        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  • CatalogState: read-only after startup                               │
//! │  • FormState: mutated only by user input, never persisted              │
//! │  • ExportState: RAII permit released when the export finishes          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod export;
mod form;

pub use catalog::CatalogState;
pub use export::{ExportPermit, ExportState};
pub use form::{FormState, OrderForm};

/// All state for one session.
pub struct AppState {
    pub catalog: CatalogState,
    pub form: FormState,
    pub export: ExportState,
}

impl AppState {
    pub fn new(catalog: CatalogState) -> Self {
        AppState {
            catalog,
            form: FormState::new(),
            export: ExportState::new(),
        }
    }
}
