//! # Catalog Loader
//!
//! Fetches the product sheet once at startup.
//!
//! ```text
//! ┌──────────────┐   GET (no auth)   ┌──────────────┐   Catalog::from_csv
//! │ CatalogSource│ ────────────────► │ CSV text     │ ──────────────────► Catalog
//! │   Remote     │                   └──────────────┘
//! │   Static     │ ─────────────────────────────────────────────────────► Catalog::builtin()
//! └──────────────┘
//! ```
//!
//! Any failure (network, non-success status, unusable sheet) becomes
//! `PlatformError::Initialization`. There is no retry.

use std::time::Duration;

use orderpad_core::Catalog;
use tracing::{info, warn};

use crate::config::{CatalogSettings, CatalogSourceKind};
use crate::error::{PlatformError, PlatformResult};

#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Published CSV sheet.
    Remote { url: String, timeout: Duration },

    /// Built-in product list.
    Static,
}

impl CatalogSource {
    /// Builds the source described by the catalog settings.
    pub fn from_settings(settings: &CatalogSettings) -> Self {
        match settings.source {
            CatalogSourceKind::Remote => CatalogSource::Remote {
                url: settings.url.clone(),
                timeout: settings.timeout(),
            },
            CatalogSourceKind::Static => CatalogSource::Static,
        }
    }

    /// Loads the catalog.
    pub async fn load(&self) -> PlatformResult<Catalog> {
        let catalog = match self {
            CatalogSource::Remote { url, timeout } => fetch_remote(url, *timeout).await?,
            CatalogSource::Static => Catalog::builtin(),
        };

        if catalog.skipped() > 0 {
            warn!(skipped = catalog.skipped(), "Discarded malformed catalog rows");
        }
        info!(products = catalog.len(), "Catalog loaded");

        Ok(catalog)
    }
}

async fn fetch_remote(url: &str, timeout: Duration) -> PlatformResult<Catalog> {
    info!(url = %url, "Fetching product sheet");

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Catalog::from_csv(&text).map_err(|e| PlatformError::Initialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned HTTP response on a local port and returns the URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/sheet.csv", addr)
    }

    fn remote(url: String) -> CatalogSource {
        CatalogSource::Remote {
            url,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_static_source() {
        let catalog = CatalogSource::Static.load().await.unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[tokio::test]
    async fn test_unreachable_sheet_is_initialization_failure() {
        let source = CatalogSource::Remote {
            url: "http://127.0.0.1:9/sheet.csv".to_string(),
            timeout: Duration::from_secs(2),
        };

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, PlatformError::Initialization(_)));
    }

    #[test]
    fn test_from_settings() {
        let mut settings = CatalogSettings::default();
        assert!(matches!(
            CatalogSource::from_settings(&settings),
            CatalogSource::Remote { .. }
        ));

        settings.source = CatalogSourceKind::Static;
        assert!(matches!(
            CatalogSource::from_settings(&settings),
            CatalogSource::Static
        ));
    }

    #[tokio::test]
    async fn test_remote_sheet_is_parsed() {
        let url = serve_once(
            "200 OK",
            "Product Code,Product Description,Product Name\n001,Red die-cast car,Toy Car\n,No code\n002,Diamond kite,\n",
        )
        .await;

        let catalog = remote(url).load().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.skipped(), 1);
        assert_eq!(catalog.get("001").unwrap().description, "Red die-cast car");
        assert!(catalog.get("002").is_some());
    }

    #[tokio::test]
    async fn test_error_status_is_initialization_failure() {
        for status in ["404 Not Found", "500 Internal Server Error"] {
            let url = serve_once(status, "Product Code,Product Description\n001,Car\n").await;

            let err = remote(url).load().await.unwrap_err();
            assert!(
                matches!(err, PlatformError::Initialization(_)),
                "{} gave {:?}",
                status,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_sheet_without_required_columns_is_initialization_failure() {
        let url = serve_once("200 OK", "Code,Name\n001,Toy Car\n").await;

        let err = remote(url).load().await.unwrap_err();
        assert!(matches!(err, PlatformError::Initialization(_)));
    }
}
