//! # Orderpad Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Orderpad CLI                                   │
//! │                                                                         │
//! │  main.rs ────► starts the tokio runtime                                 │
//! │  lib.rs ─────► logging, config, startup, command dispatch               │
//! │  commands/ ──► list_products, set_quantity, export_order                │
//! │  state/ ─────► CatalogState, FormState, ExportState                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    orderpad_cli_lib::run().await
}
