//! # Catalog State
//!
//! The product list and location captured at startup. Read-only afterwards,
//! so no lock is needed.

use orderpad_core::{Catalog, Location};
use orderpad_platform::Startup;

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
    location: Option<Location>,
}

impl CatalogState {
    pub fn new(catalog: Catalog, location: Option<Location>) -> Self {
        CatalogState { catalog, location }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }
}

impl From<Startup> for CatalogState {
    fn from(startup: Startup) -> Self {
        CatalogState::new(startup.catalog, startup.location)
    }
}
