//! # Export Commands
//!
//! Turns the current form into an order CSV and sends it off the device.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  export_order()                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ExportState::try_begin ── pending ──► EXPORT_IN_PROGRESS               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshot form ──► ExportArtifact::build ── nothing ordered ──►        │
//! │       │                                      "No Products"              │
//! │       ▼                                                                 │
//! │  Exporter::export                                                       │
//! │       ├── Saved ──────────────► "Success" notice                        │
//! │       ├── Shared ─────────────► share sheet was shown, no notice        │
//! │       └── Err ────────────────► "Export Failed" notice                  │
//! │                                                                         │
//! │  permit dropped ──► trigger enabled again                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use orderpad_core::ExportArtifact;
use orderpad_platform::{ExportReport, Exporter};
use serde::Serialize;
use tracing::{debug, info};

use super::Notice;
use crate::error::ApiError;
use crate::state::{CatalogState, ExportState, FormState};

/// Result of a finished export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub file_name: String,

    /// Number of products written.
    pub line_items: usize,

    /// Where the file was saved, if it was saved rather than shared.
    pub saved_to: Option<String>,

    /// Set when saving failed and the content was shared inline instead.
    pub fallback: bool,

    pub notice: Option<Notice>,
}

/// Exports the current order.
///
/// ## Errors
/// - `EXPORT_IN_PROGRESS` while a previous export is still running
/// - `NO_PRODUCTS` when no quantity is positive; nothing is written
/// - `PERMISSION_DENIED` / `EXPORT_FAILED` when save and share both fail
pub async fn export_order(
    catalog: &CatalogState,
    form: &FormState,
    export: &ExportState,
    exporter: &Exporter,
) -> Result<ExportResponse, ApiError> {
    debug!("export_order command");

    let _permit = export.try_begin().ok_or_else(ApiError::export_in_progress)?;

    let snapshot = form.snapshot();
    let artifact = ExportArtifact::build(
        catalog.catalog().products(),
        &snapshot.quantities,
        &snapshot.customer,
        catalog.location(),
        Utc::now(),
    )?;

    let report = exporter.export(&artifact).await?;

    let response = match report {
        ExportReport::Saved(saved) => {
            info!(file = %artifact.file_name, path = ?saved.path, "Export complete");
            ExportResponse {
                file_name: artifact.file_name,
                line_items: artifact.line_items,
                notice: Some(Notice::new(
                    "Success",
                    format!("File saved to {}", saved.display_path),
                )),
                saved_to: Some(saved.display_path),
                fallback: false,
            }
        }
        ExportReport::Shared { fallback } => {
            info!(file = %artifact.file_name, fallback, "Order shared");
            ExportResponse {
                file_name: artifact.file_name,
                line_items: artifact.line_items,
                saved_to: None,
                fallback,
                notice: None,
            }
        }
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use orderpad_core::{Catalog, CustomerField};
    use orderpad_platform::{
        ExportMode, LocalFileStore, PlatformError, PlatformResult, ShareRequest, ShareSheet,
    };
    use std::sync::{Arc, Mutex};

    use crate::commands::form::{set_customer_field, set_quantity};

    #[derive(Default)]
    struct RecordingShare {
        requests: Mutex<Vec<ShareRequest>>,
    }

    #[async_trait]
    impl ShareSheet for RecordingShare {
        async fn share(&self, request: &ShareRequest) -> PlatformResult<()> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    struct DismissedShare;

    #[async_trait]
    impl ShareSheet for DismissedShare {
        async fn share(&self, _request: &ShareRequest) -> PlatformResult<()> {
            Err(PlatformError::ShareFailure("dismissed".into()))
        }
    }

    fn setup() -> (CatalogState, FormState, ExportState) {
        (
            CatalogState::new(Catalog::builtin(), None),
            FormState::new(),
            ExportState::new(),
        )
    }

    fn exporter(
        mode: ExportMode,
        dir: &std::path::Path,
        permission: bool,
        share: Arc<dyn ShareSheet>,
    ) -> Exporter {
        let store = LocalFileStore::new(dir, "Orders").with_permission(permission);
        Exporter::new(mode, Arc::new(store), share, dir.join("cache"))
    }

    #[tokio::test]
    async fn test_export_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, form, export) = setup();
        set_quantity(&catalog, &form, "001", "2").unwrap();
        set_quantity(&catalog, &form, "003", "0").unwrap();
        set_customer_field(&form, CustomerField::Store, "Acme").unwrap();

        let exporter = exporter(
            ExportMode::SaveWithShareFallback,
            dir.path(),
            true,
            Arc::new(RecordingShare::default()),
        );
        let response = export_order(&catalog, &form, &export, &exporter).await.unwrap();

        assert_eq!(response.line_items, 1);
        assert!(!response.fallback);
        let notice = response.notice.unwrap();
        assert_eq!(notice.title, "Success");
        assert_eq!(
            notice.message,
            format!("File saved to Downloads/Orders/{}", response.file_name)
        );

        let written = std::fs::read_to_string(
            dir.path()
                .join("Downloads")
                .join("Orders")
                .join(&response.file_name),
        )
        .unwrap();
        assert!(written.starts_with("Code,Description,Quantity\n001,"));
        assert!(written.contains("Store:,Acme"));
        assert!(!export.is_pending());
    }

    #[tokio::test]
    async fn test_export_without_products() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, form, export) = setup();
        set_quantity(&catalog, &form, "001", "0").unwrap();

        let exporter = exporter(
            ExportMode::SaveWithShareFallback,
            dir.path(),
            true,
            Arc::new(RecordingShare::default()),
        );
        let err = export_order(&catalog, &form, &export, &exporter)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NoProducts);
        assert!(!dir.path().join("Downloads").exists());
        assert!(!export.is_pending());
    }

    #[tokio::test]
    async fn test_export_denied_storage_falls_back_to_share() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, form, export) = setup();
        set_quantity(&catalog, &form, "002", "5").unwrap();

        let share = Arc::new(RecordingShare::default());
        let exporter = exporter(
            ExportMode::SaveWithShareFallback,
            dir.path(),
            false,
            share.clone(),
        );
        let response = export_order(&catalog, &form, &export, &exporter).await.unwrap();

        assert!(response.fallback);
        assert_eq!(response.notice, None);
        let requests = share.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.starts_with("data:text/csv;base64,"));
    }

    #[tokio::test]
    async fn test_export_share_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, form, export) = setup();
        set_quantity(&catalog, &form, "002", "5").unwrap();

        let exporter = exporter(ExportMode::ShareOnly, dir.path(), true, Arc::new(DismissedShare));
        let err = export_order(&catalog, &form, &export, &exporter)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ExportFailed);
        assert_eq!(err.title, "Export Failed");
        assert!(!export.is_pending());
    }

    #[tokio::test]
    async fn test_second_export_while_pending() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, form, export) = setup();
        set_quantity(&catalog, &form, "001", "1").unwrap();

        let exporter = exporter(
            ExportMode::SaveWithShareFallback,
            dir.path(),
            true,
            Arc::new(RecordingShare::default()),
        );

        let permit = export.try_begin();
        let err = export_order(&catalog, &form, &export, &exporter)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportInProgress);

        drop(permit);
        assert!(export_order(&catalog, &form, &export, &exporter).await.is_ok());
    }
}
