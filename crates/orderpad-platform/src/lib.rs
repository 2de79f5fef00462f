//! # orderpad-platform: Platform Services for Orderpad
//!
//! Every call that leaves the process: the catalog fetch, the location
//! prompt, the file write and the share action. The host services are
//! traits so a terminal, a desktop shell or a test can plug in its own.
//!
//! ## Startup and Export
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Orderpad Session                               │
//! │                                                                         │
//! │  startup (concurrent)                                                  │
//! │  ┌──────────────────────┐     ┌──────────────────────┐                 │
//! │  │ CatalogSource::load  │     │ fetch_location       │                 │
//! │  │ Err ──► not ready    │     │ Err ──► None         │                 │
//! │  └──────────┬───────────┘     └──────────┬───────────┘                 │
//! │             └──────────────┬─────────────┘                             │
//! │                            ▼                                            │
//! │                  form (quantities, customer)                           │
//! │                            │                                            │
//! │                            ▼                                            │
//! │           ExportArtifact::build ──► Exporter::export                   │
//! │                                      ├── FileStore (save)              │
//! │                                      └── ShareSheet (fallback / share) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod exporter;
pub mod location;
pub mod share;
pub mod storage;

pub use catalog::CatalogSource;
pub use config::{CatalogSourceKind, ExportMode, OrderConfig};
pub use error::{Permission, PlatformError, PlatformResult};
pub use exporter::{ExportReport, Exporter};
pub use location::{fetch_location, ConfiguredLocation, LocationProvider, NoLocation};
pub use share::{ConsoleShare, ConsoleTarget, ShareRequest, ShareSheet};
pub use storage::{FileStore, LocalFileStore, SavedFile};

use orderpad_core::{Catalog, Location};

/// Everything gathered before the form is shown.
#[derive(Debug, Clone)]
pub struct Startup {
    pub catalog: Catalog,
    pub location: Option<Location>,
}

/// Loads the catalog and reads the location at the same time.
///
/// ## Errors
/// Only the catalog can fail startup; a missing location is logged and
/// reported as `None`.
pub async fn initialize(
    source: &CatalogSource,
    location: &dyn LocationProvider,
) -> PlatformResult<Startup> {
    let (catalog, location) = tokio::join!(source.load(), fetch_location(location));

    Ok(Startup {
        catalog: catalog?,
        location,
    })
}
