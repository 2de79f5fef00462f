//! # Location Fetch
//!
//! One permission prompt, one position read, at startup. Never refreshed.
//!
//! ```text
//! request_permission() ── denied ──────────────────────► None
//!         │
//!      granted
//!         ▼
//! current_position() ──── failed ──────────────────────► None
//!         │
//!         ▼
//!   Some(Location)
//! ```
//!
//! A missing location is not an error for the app: the export simply says
//! "Not available".

use async_trait::async_trait;
use orderpad_core::Location;
use tracing::{info, warn};

use crate::config::LocationSettings;
use crate::error::{Permission, PlatformError, PlatformResult};

/// Host geolocation service.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Asks for foreground location access.
    async fn request_permission(&self) -> bool;

    /// Reads the current position once.
    async fn current_position(&self) -> PlatformResult<Location>;
}

/// Requests permission and reads the position, swallowing every failure.
pub async fn fetch_location(provider: &dyn LocationProvider) -> Option<Location> {
    if !provider.request_permission().await {
        warn!(error = %PlatformError::PermissionDenied(Permission::Location), "Continuing without location");
        return None;
    }

    match provider.current_position().await {
        Ok(location) => {
            info!(lat = location.latitude, lon = location.longitude, "Location captured");
            Some(location)
        }
        Err(e) => {
            warn!(error = %e, "Continuing without location");
            None
        }
    }
}

// =============================================================================
// Implementations
// =============================================================================

/// Reports the position from configuration.
///
/// Permission is granted only when location is enabled in the config and
/// both coordinates are present.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    position: Option<Location>,
}

impl ConfiguredLocation {
    pub fn new(settings: &LocationSettings) -> Self {
        ConfiguredLocation {
            position: settings.position(),
        }
    }

    pub fn fixed(location: Location) -> Self {
        ConfiguredLocation {
            position: Some(location),
        }
    }
}

#[async_trait]
impl LocationProvider for ConfiguredLocation {
    async fn request_permission(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self) -> PlatformResult<Location> {
        self.position
            .ok_or_else(|| PlatformError::LocationUnavailable("no position configured".into()))
    }
}

/// A host without any location service. Always denies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn request_permission(&self) -> bool {
        false
    }

    async fn current_position(&self) -> PlatformResult<Location> {
        Err(PlatformError::PermissionDenied(Permission::Location))
    }
}
