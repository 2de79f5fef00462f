//! # Share Sheet
//!
//! Hands an export to whatever the host offers for sharing (mail, chat,
//! cloud drive). On a terminal host the payload is printed to the console.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::{PlatformError, PlatformResult};

pub const SHARE_TITLE: &str = "Order Export";
pub const SHARE_MESSAGE: &str = "Here is the order export:";

/// Payload passed to the share action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareRequest {
    pub title: String,
    pub message: String,
    /// File path or `data:` URL.
    pub url: String,
}

impl ShareRequest {
    /// Shares a file that already exists on disk.
    pub fn file(path: &std::path::Path) -> Self {
        ShareRequest {
            title: SHARE_TITLE.to_string(),
            message: SHARE_MESSAGE.to_string(),
            url: path.display().to_string(),
        }
    }

    /// Shares the CSV inline as a base64 `data:` URL.
    pub fn inline_csv(content: &str) -> Self {
        ShareRequest {
            title: SHARE_TITLE.to_string(),
            message: SHARE_MESSAGE.to_string(),
            url: csv_data_url(content),
        }
    }
}

/// `data:text/csv;base64,...` for the given CSV text.
pub fn csv_data_url(content: &str) -> String {
    format!("data:text/csv;base64,{}", STANDARD.encode(content.as_bytes()))
}

/// Host share action.
#[async_trait]
pub trait ShareSheet: Send + Sync {
    async fn share(&self, request: &ShareRequest) -> PlatformResult<()>;
}

/// Stream the console share action writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stdout,

    /// Keeps stdout free for machine-readable output.
    Stderr,
}

/// Prints the share payload on the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleShare {
    target: ConsoleTarget,
}

impl ConsoleShare {
    pub fn new(target: ConsoleTarget) -> Self {
        ConsoleShare { target }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

fn console_payload(request: &ShareRequest) -> String {
    format!("{}\n{}\n{}\n", request.title, request.message, request.url)
}

#[async_trait]
impl ShareSheet for ConsoleShare {
    async fn share(&self, request: &ShareRequest) -> PlatformResult<()> {
        let text = console_payload(request);

        match self.target {
            ConsoleTarget::Stdout => write_console(tokio::io::stdout(), &text).await,
            ConsoleTarget::Stderr => write_console(tokio::io::stderr(), &text).await,
        }
    }
}

async fn write_console<W>(mut out: W, text: &str) -> PlatformResult<()>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes())
        .await
        .map_err(|e| PlatformError::ShareFailure(e.to_string()))?;
    out.flush()
        .await
        .map_err(|e| PlatformError::ShareFailure(e.to_string()))
}
