//! # Orderpad Configuration
//!
//! Where the catalog comes from, how exports leave the device, and what the
//! location and storage collaborators report.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ORDERPAD_CATALOG_URL=https://...                                   │
//! │     ORDERPAD_EXPORT_MODE=share_only                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/orderpad/orderpad.toml (Linux)                           │
//! │     ~/Library/Application Support/com.orderpad.orderpad/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     remote sheet, save with share fallback, no location                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! source = "remote"   # remote | static
//! url = "https://docs.google.com/spreadsheets/d/e/.../pub?output=csv"
//! timeout_secs = 15
//!
//! [export]
//! mode = "save_with_share_fallback"   # save_with_share_fallback | share_only
//! data_dir = "/home/rep/orderpad"
//! album = "Orders"
//!
//! [storage]
//! permission_granted = true
//!
//! [location]
//! enabled = true
//! latitude = 37.7749
//! longitude = -122.4194
//! ```

use std::path::PathBuf;
use std::time::Duration;

use orderpad_core::validation::validate_coordinates;
use orderpad_core::{Location, ORDERS_ALBUM};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PlatformError, PlatformResult};

/// Published product sheet used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTziUOryoNtGBCpqIhdkM_jkEc9YAzVSYHC-CJNm3qxsxLuovUOrBjytfEIoP-DVi9gppBIl1VJy9iO/pub?output=csv";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "orderpad.toml";

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where the product list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSourceKind {
    /// Fetch the published CSV sheet over HTTP.
    #[default]
    Remote,

    /// Use the built-in product list (no network).
    Static,
}

impl std::str::FromStr for CatalogSourceKind {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" | "sheet" | "http" => Ok(CatalogSourceKind::Remote),
            "static" | "builtin" | "mock" => Ok(CatalogSourceKind::Static),
            other => Err(PlatformError::InvalidConfig(format!(
                "Unknown catalog source: '{}'. Valid options: remote, static",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub source: CatalogSourceKind,

    /// CSV sheet URL (http or https).
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            source: CatalogSourceKind::default(),
            url: default_catalog_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl CatalogSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Export Settings
// =============================================================================

/// How a finished export leaves the device.
///
/// ```text
/// SAVE_WITH_SHARE_FALLBACK (default)     SHARE_ONLY
/// ──────────────────────────────────     ──────────
/// storage permission?                    write to cache dir
///   │ yes: write Downloads/Orders/...      │
///   │      file into Orders album          ▼
///   │ no / write failed:                 share file path
///   ▼
/// share data: URL with the CSV inline
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    #[default]
    SaveWithShareFallback,
    ShareOnly,
}

impl std::str::FromStr for ExportMode {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "save" | "save_with_share_fallback" | "android" => Ok(ExportMode::SaveWithShareFallback),
            "share" | "share_only" | "ios" => Ok(ExportMode::ShareOnly),
            other => Err(PlatformError::InvalidConfig(format!(
                "Unknown export mode: '{}'. Valid options: save_with_share_fallback, share_only",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportMode::SaveWithShareFallback => write!(f, "save_with_share_fallback"),
            ExportMode::ShareOnly => write!(f, "share_only"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default)]
    pub mode: ExportMode,

    /// Root of the device-visible storage. Exports land in
    /// `<data_dir>/Downloads/<album>/`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Scratch directory for share-only exports.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Album (folder) saved orders are filed under.
    #[serde(default = "default_album")]
    pub album: String,
}

fn default_album() -> String {
    ORDERS_ALBUM.to_string()
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            mode: ExportMode::default(),
            data_dir: None,
            cache_dir: None,
            album: default_album(),
        }
    }
}

// =============================================================================
// Storage / Location Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Answer given to the storage permission prompt.
    #[serde(default = "default_true")]
    pub permission_granted: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            permission_granted: true,
        }
    }
}

/// Fixed position reported by the location collaborator.
///
/// Location is granted only when `enabled` is set and both coordinates are
/// present; otherwise the export carries "Not available".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LocationSettings {
    /// The configured position, if location is enabled and complete.
    pub fn position(&self) -> Option<Location> {
        if !self.enabled {
            return None;
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Location::new(lat, lon)),
            _ => None,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub location: LocationSettings,
}

impl OrderConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (orderpad.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> PlatformResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| PlatformError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> PlatformResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| PlatformError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlatformError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| PlatformError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> PlatformResult<()> {
        if self.catalog.source == CatalogSourceKind::Remote {
            let url = url::Url::parse(&self.catalog.url)?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(PlatformError::InvalidConfig(format!(
                    "Catalog URL must start with http:// or https://, got: {}",
                    self.catalog.url
                )));
            }
        }

        if self.catalog.timeout_secs == 0 {
            return Err(PlatformError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.export.album.trim().is_empty() {
            return Err(PlatformError::InvalidConfig("album must not be empty".into()));
        }

        if let (Some(lat), Some(lon)) = (self.location.latitude, self.location.longitude) {
            validate_coordinates(lat, lon)
                .map_err(|e| PlatformError::InvalidConfig(e.to_string()))?;
        }

        Ok(())
    }

    /// Applies environment overrides, reading variables through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ORDERPAD_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.url = url;
        }

        if let Some(source) = lookup("ORDERPAD_CATALOG_SOURCE") {
            match source.parse() {
                Ok(parsed) => self.catalog.source = parsed,
                Err(_) => warn!(source = %source, "Unknown catalog source in environment"),
            }
        }

        if let Some(mode) = lookup("ORDERPAD_EXPORT_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding export mode from environment");
                    self.export.mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown export mode in environment"),
            }
        }

        if let Some(dir) = lookup("ORDERPAD_DATA_DIR") {
            self.export.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(dir) = lookup("ORDERPAD_CACHE_DIR") {
            self.export.cache_dir = Some(PathBuf::from(dir));
        }

        let lat = lookup("ORDERPAD_LATITUDE").and_then(|v| v.parse::<f64>().ok());
        let lon = lookup("ORDERPAD_LONGITUDE").and_then(|v| v.parse::<f64>().ok());
        if let (Some(lat), Some(lon)) = (lat, lon) {
            debug!(lat, lon, "Overriding location from environment");
            self.location = LocationSettings {
                enabled: true,
                latitude: Some(lat),
                longitude: Some(lon),
            };
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Root directory saved exports are written under.
    pub fn data_dir(&self) -> PathBuf {
        self.export
            .data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| std::env::temp_dir().join("orderpad"))
    }

    /// Directory share-only exports are staged in.
    pub fn cache_dir(&self) -> PathBuf {
        self.export
            .cache_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.cache_dir().to_path_buf()))
            .unwrap_or_else(|| std::env::temp_dir().join("orderpad-cache"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "orderpad", "orderpad")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = OrderConfig::default();
        assert_eq!(config.catalog.source, CatalogSourceKind::Remote);
        assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
        assert_eq!(config.export.mode, ExportMode::SaveWithShareFallback);
        assert_eq!(config.export.album, "Orders");
        assert!(config.storage.permission_granted);
        assert!(config.location.position().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("share_only".parse::<ExportMode>().unwrap(), ExportMode::ShareOnly);
        assert_eq!("ios".parse::<ExportMode>().unwrap(), ExportMode::ShareOnly);
        assert_eq!(
            "save-with-share-fallback".parse::<ExportMode>().unwrap(),
            ExportMode::SaveWithShareFallback
        );
        assert!("fax".parse::<ExportMode>().is_err());

        assert_eq!("mock".parse::<CatalogSourceKind>().unwrap(), CatalogSourceKind::Static);
        assert!("ftp".parse::<CatalogSourceKind>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = OrderConfig::default();

        config.catalog.url = "ftp://example.com/sheet.csv".to_string();
        assert!(config.validate().is_err());

        config.catalog.url = "not a url".to_string();
        assert!(config.validate().is_err());

        // URL is irrelevant for the static catalog
        config.catalog.source = CatalogSourceKind::Static;
        assert!(config.validate().is_ok());

        config.catalog.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.catalog.timeout_secs = 5;

        config.location.latitude = Some(120.0);
        config.location.longitude = Some(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_location_position() {
        let mut location = LocationSettings {
            enabled: false,
            latitude: Some(1.5),
            longitude: Some(2.5),
        };
        assert!(location.position().is_none());

        location.enabled = true;
        assert_eq!(location.position(), Some(Location::new(1.5, 2.5)));

        location.longitude = None;
        assert!(location.position().is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ORDERPAD_CATALOG_SOURCE", "static"),
            ("ORDERPAD_EXPORT_MODE", "share_only"),
            ("ORDERPAD_DATA_DIR", "/tmp/orders"),
            ("ORDERPAD_LATITUDE", "51.5"),
            ("ORDERPAD_LONGITUDE", "-0.12"),
        ]
        .into_iter()
        .collect();

        let mut config = OrderConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.source, CatalogSourceKind::Static);
        assert_eq!(config.export.mode, ExportMode::ShareOnly);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/orders"));
        assert_eq!(config.location.position(), Some(Location::new(51.5, -0.12)));
    }

    #[test]
    fn test_unknown_env_values_are_ignored() {
        let mut config = OrderConfig::default();
        config.apply_env_overrides(|key| match key {
            "ORDERPAD_EXPORT_MODE" => Some("carrier-pigeon".to_string()),
            "ORDERPAD_LATITUDE" => Some("north".to_string()),
            "ORDERPAD_LONGITUDE" => Some("1.0".to_string()),
            _ => None,
        });

        assert_eq!(config.export.mode, ExportMode::SaveWithShareFallback);
        assert!(config.location.position().is_none());
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = OrderConfig::default();
        config.export.mode = ExportMode::ShareOnly;
        config.location.enabled = true;
        config.location.latitude = Some(10.0);
        config.location.longitude = Some(20.0);
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[catalog]"));
        assert!(contents.contains("mode = \"share_only\""));

        let loaded: OrderConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.export.mode, ExportMode::ShareOnly);
        assert_eq!(loaded.location.position(), Some(Location::new(10.0, 20.0)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: OrderConfig = toml::from_str("[catalog]\nsource = \"static\"\n").unwrap();
        assert_eq!(config.catalog.source, CatalogSourceKind::Static);
        assert_eq!(config.catalog.timeout_secs, 15);
        assert_eq!(config.export.album, "Orders");
    }
}
