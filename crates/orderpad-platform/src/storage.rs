//! # File Store
//!
//! Writes export files somewhere the user can find them afterwards.
//!
//! ## Directory Layout
//! ```text
//! <data_dir>/
//! └── Downloads/
//!     └── Orders/                      ◄── album folder
//!         ├── album.json               ◄── album index (asset list)
//!         ├── order_2024-05-01T10-20-30-123Z.csv
//!         └── order_2024-05-02T08-01-12-004Z.csv
//! ```
//!
//! Saving is: permission check, create folders (existing folders are fine),
//! write the file as UTF-8, then file it into the album index, creating the
//! album on first use.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PlatformError, PlatformResult};

/// Name of the folder the album lives in, under the data dir.
pub const DOWNLOADS_DIR: &str = "Downloads";

/// Album index file name.
pub const ALBUM_INDEX: &str = "album.json";

/// Where a saved export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Absolute path of the written file.
    pub path: PathBuf,

    /// Short user-facing location, e.g. `Downloads/Orders/order_....csv`.
    pub display_path: String,
}

/// Host storage / media library.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Asks for write access to shared storage.
    async fn request_permission(&self) -> bool;

    /// Writes the export and files it into the album.
    async fn save(&self, file_name: &str, content: &str) -> PlatformResult<SavedFile>;
}

// =============================================================================
// Album Index
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct AlbumIndex {
    name: String,
    assets: Vec<String>,
}

// =============================================================================
// Local File Store
// =============================================================================

/// Saves exports under a directory on the local file system.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    album: String,
    permission_granted: bool,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, album: impl Into<String>) -> Self {
        LocalFileStore {
            root: root.into(),
            album: album.into(),
            permission_granted: true,
        }
    }

    /// Sets the answer to the permission prompt.
    pub fn with_permission(mut self, granted: bool) -> Self {
        self.permission_granted = granted;
        self
    }

    /// Folder exports are written to.
    pub fn album_dir(&self) -> PathBuf {
        self.root.join(DOWNLOADS_DIR).join(&self.album)
    }

    /// Adds a file to the album index, creating the album if needed.
    async fn add_to_album(&self, dir: &Path, file_name: &str) -> PlatformResult<()> {
        let index_path = dir.join(ALBUM_INDEX);

        let mut index = match tokio::fs::read_to_string(&index_path).await {
            Ok(text) => serde_json::from_str::<AlbumIndex>(&text)
                .map_err(|e| write_failure(file_name, format!("corrupt album index: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(album = %self.album, "Creating album");
                AlbumIndex {
                    name: self.album.clone(),
                    assets: Vec::new(),
                }
            }
            Err(e) => return Err(write_failure(file_name, e)),
        };

        if !index.assets.iter().any(|a| a == file_name) {
            index.assets.push(file_name.to_string());
        }

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| write_failure(file_name, e))?;
        tokio::fs::write(&index_path, json)
            .await
            .map_err(|e| write_failure(file_name, e))?;

        Ok(())
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn request_permission(&self) -> bool {
        self.permission_granted
    }

    async fn save(&self, file_name: &str, content: &str) -> PlatformResult<SavedFile> {
        let dir = self.album_dir();
        let path = write_utf8(&dir, file_name, content).await?;

        self.add_to_album(&dir, file_name).await?;

        info!(path = %path.display(), "Order saved");
        Ok(SavedFile {
            path,
            display_path: format!("{}/{}/{}", DOWNLOADS_DIR, self.album, file_name),
        })
    }
}

/// Creates `dir` (with parents) and writes `content` into `dir/file_name`.
pub async fn write_utf8(dir: &Path, file_name: &str, content: &str) -> PlatformResult<PathBuf> {
    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        debug!(dir = %dir.display(), error = %e, "Could not create export directory");
    }

    let path = dir.join(file_name);
    tokio::fs::write(&path, content.as_bytes())
        .await
        .map_err(|e| write_failure(file_name, e))?;

    Ok(path)
}

fn write_failure(file_name: &str, reason: impl std::fmt::Display) -> PlatformError {
    PlatformError::WriteFailure {
        file_name: file_name.to_string(),
        reason: reason.to_string(),
    }
}
