//! # Export Dispatcher
//!
//! Takes a finished [`ExportArtifact`] off the device.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Exporter::export                                │
//! │                                                                         │
//! │  SaveWithShareFallback                    ShareOnly                     │
//! │  ─────────────────────                    ─────────                     │
//! │  store.request_permission()               write <cache>/order_*.csv     │
//! │     │ denied ──────────┐                      │ failed ──► WriteFailure │
//! │     ▼                  │                      ▼                         │
//! │  store.save()          │                  share(file path)              │
//! │     │ failed ──────────┤                      │ failed ──► ShareFailure │
//! │     ▼                  ▼                      ▼                         │
//! │  Saved          share(data: URL)          Shared { fallback: false }    │
//! │                        │ failed ──► ShareFailure                        │
//! │                        ▼                                                │
//! │                 Shared { fallback: true }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only a refused storage permission or a failed write falls back to the
//! share action; other errors are returned as they are. Nothing is retried.

use std::path::PathBuf;
use std::sync::Arc;

use orderpad_core::ExportArtifact;
use tracing::{info, warn};

use crate::config::{ExportMode, OrderConfig};
use crate::error::{Permission, PlatformError, PlatformResult};
use crate::share::{ConsoleShare, ConsoleTarget, ShareRequest, ShareSheet};
use crate::storage::{write_utf8, FileStore, LocalFileStore, SavedFile};

/// What happened to an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportReport {
    /// Written to device storage.
    Saved(SavedFile),

    /// Handed to the share action. `fallback` is set when saving was tried
    /// first and failed.
    Shared { fallback: bool },
}

pub struct Exporter {
    mode: ExportMode,
    store: Arc<dyn FileStore>,
    share: Arc<dyn ShareSheet>,
    cache_dir: PathBuf,
}

impl Exporter {
    pub fn new(
        mode: ExportMode,
        store: Arc<dyn FileStore>,
        share: Arc<dyn ShareSheet>,
        cache_dir: impl Into<PathBuf>,
    ) -> Self {
        Exporter {
            mode,
            store,
            share,
            cache_dir: cache_dir.into(),
        }
    }

    /// Builds the exporter the configuration describes: local file store
    /// and a console share printing to `console`.
    pub fn from_config(config: &OrderConfig, console: ConsoleTarget) -> Self {
        let store = LocalFileStore::new(config.data_dir(), config.export.album.clone())
            .with_permission(config.storage.permission_granted);

        Exporter::new(
            config.export.mode,
            Arc::new(store),
            Arc::new(ConsoleShare::new(console)),
            config.cache_dir(),
        )
    }

    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    /// Sends the artifact off the device.
    pub async fn export(&self, artifact: &ExportArtifact) -> PlatformResult<ExportReport> {
        info!(file = %artifact.file_name, mode = %self.mode, "Exporting order");

        match self.mode {
            ExportMode::SaveWithShareFallback => self.save_or_share(artifact).await,
            ExportMode::ShareOnly => self.share_file(artifact).await,
        }
    }

    async fn save_or_share(&self, artifact: &ExportArtifact) -> PlatformResult<ExportReport> {
        match self.save(artifact).await {
            Ok(saved) => Ok(ExportReport::Saved(saved)),
            Err(e) if e.triggers_share_fallback() => {
                warn!(error = %e, "Save failed, falling back to share");
                self.share(&ShareRequest::inline_csv(&artifact.content)).await?;
                Ok(ExportReport::Shared { fallback: true })
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, artifact: &ExportArtifact) -> PlatformResult<SavedFile> {
        if !self.store.request_permission().await {
            return Err(PlatformError::PermissionDenied(Permission::Storage));
        }

        self.store.save(&artifact.file_name, &artifact.content).await
    }

    async fn share_file(&self, artifact: &ExportArtifact) -> PlatformResult<ExportReport> {
        let path = write_utf8(&self.cache_dir, &artifact.file_name, &artifact.content).await?;
        self.share(&ShareRequest::file(&path)).await?;
        Ok(ExportReport::Shared { fallback: false })
    }

    async fn share(&self, request: &ShareRequest) -> PlatformResult<()> {
        self.share.share(request).await.map_err(|e| match e {
            PlatformError::ShareFailure(_) => e,
            other => PlatformError::ShareFailure(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use orderpad_core::{CustomerInfo, Product, QuantityMap};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingShare {
        requests: Mutex<Vec<ShareRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl ShareSheet for RecordingShare {
        async fn share(&self, request: &ShareRequest) -> PlatformResult<()> {
            if self.fail {
                return Err(PlatformError::ShareFailure("dismissed".into()));
            }
            self.requests.lock().await.push(request.clone());
            Ok(())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl FileStore for FailingStore {
        async fn request_permission(&self) -> bool {
            true
        }

        async fn save(&self, file_name: &str, _content: &str) -> PlatformResult<SavedFile> {
            Err(PlatformError::WriteFailure {
                file_name: file_name.to_string(),
                reason: "disk full".into(),
            })
        }
    }

    struct MisconfiguredStore;

    #[async_trait]
    impl FileStore for MisconfiguredStore {
        async fn request_permission(&self) -> bool {
            true
        }

        async fn save(&self, _file_name: &str, _content: &str) -> PlatformResult<SavedFile> {
            Err(PlatformError::InvalidConfig("album must not be empty".into()))
        }
    }

    fn artifact() -> ExportArtifact {
        let mut quantities = QuantityMap::new();
        quantities.set("001", "3").unwrap();
        ExportArtifact::build(
            &[Product::new("001", "Toy Car")],
            &quantities,
            &CustomerInfo::default(),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let share = Arc::new(RecordingShare::default());
        let exporter = Exporter::new(
            ExportMode::SaveWithShareFallback,
            Arc::new(LocalFileStore::new(dir.path(), "Orders")),
            share.clone(),
            dir.path().join("cache"),
        );

        let artifact = artifact();
        let report = exporter.export(&artifact).await.unwrap();

        let saved = match report {
            ExportReport::Saved(saved) => saved,
            other => panic!("expected a saved export, got {:?}", other),
        };
        assert_eq!(std::fs::read_to_string(&saved.path).unwrap(), artifact.content);
        assert!(share.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_denied_storage_falls_back_to_inline_share() {
        let dir = tempfile::tempdir().unwrap();
        let share = Arc::new(RecordingShare::default());
        let exporter = Exporter::new(
            ExportMode::SaveWithShareFallback,
            Arc::new(LocalFileStore::new(dir.path(), "Orders").with_permission(false)),
            share.clone(),
            dir.path().join("cache"),
        );

        let artifact = artifact();
        let report = exporter.export(&artifact).await.unwrap();

        assert_eq!(report, ExportReport::Shared { fallback: true });
        let requests = share.requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], ShareRequest::inline_csv(&artifact.content));
        assert!(!dir.path().join("Downloads").exists());
    }

    #[tokio::test]
    async fn test_write_failure_falls_back_to_share() {
        let share = Arc::new(RecordingShare::default());
        let exporter = Exporter::new(
            ExportMode::SaveWithShareFallback,
            Arc::new(FailingStore),
            share.clone(),
            "/unused",
        );

        let report = exporter.export(&artifact()).await.unwrap();

        assert_eq!(report, ExportReport::Shared { fallback: true });
        assert!(share.requests.lock().await[0].url.starts_with("data:text/csv;base64,"));
    }

    #[tokio::test]
    async fn test_fallback_share_failure_is_reported() {
        let share = Arc::new(RecordingShare {
            fail: true,
            ..Default::default()
        });
        let exporter = Exporter::new(
            ExportMode::SaveWithShareFallback,
            Arc::new(FailingStore),
            share,
            "/unused",
        );

        let err = exporter.export(&artifact()).await.unwrap_err();
        assert!(matches!(err, PlatformError::ShareFailure(_)));
    }

    #[tokio::test]
    async fn test_share_only_stages_file_in_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("cache");
        let share = Arc::new(RecordingShare::default());
        let exporter = Exporter::new(
            ExportMode::ShareOnly,
            Arc::new(FailingStore),
            share.clone(),
            &cache,
        );

        let artifact = artifact();
        let report = exporter.export(&artifact).await.unwrap();

        assert_eq!(report, ExportReport::Shared { fallback: false });
        let staged = cache.join(&artifact.file_name);
        assert_eq!(std::fs::read_to_string(&staged).unwrap(), artifact.content);
        assert_eq!(share.requests.lock().await[0].url, staged.display().to_string());
    }

    #[tokio::test]
    async fn test_unrelated_save_error_is_not_shared() {
        let share = Arc::new(RecordingShare::default());
        let exporter = Exporter::new(
            ExportMode::SaveWithShareFallback,
            Arc::new(MisconfiguredStore),
            share.clone(),
            "/unused",
        );

        let err = exporter.export(&artifact()).await.unwrap_err();

        assert!(matches!(err, PlatformError::InvalidConfig(_)));
        assert!(share.requests.lock().await.is_empty());
    }
}
