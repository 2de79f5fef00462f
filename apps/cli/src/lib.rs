//! # Orderpad CLI Library
//!
//! Host application for Orderpad: loads configuration, runs startup and
//! dispatches the chosen command.
//!
//! ## Module Organization
//! ```text
//! orderpad_cli_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── Argument parsing (clap)
//! ├── session.rs      ◄─── Interactive form
//! ├── render.rs       ◄─── Plain-text output
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Catalog + location (read-only)
//! │   ├── form.rs     ◄─── Customer fields + quantities
//! │   └── export.rs   ◄─── One-export-at-a-time guard
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, Notice
//! │   ├── catalog.rs  ◄─── list_products
//! │   ├── form.rs     ◄─── set_quantity, set_customer_field, reset_form
//! │   └── export.rs   ◄─── export_order
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod session;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orderpad_core::CustomerField;
use orderpad_platform::{
    initialize, CatalogSource, CatalogSourceKind, ConfiguredLocation, ConsoleTarget, Exporter,
    OrderConfig,
};
use serde::Serialize;
use tokio::io::BufReader;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::ApiError;
use state::{AppState, CatalogState};

/// Runs the application and returns the process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,orderpad=debug,reqwest=warn (override: RUST_LOG)    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults ► orderpad.toml ► ORDERPAD_* env ► --static-catalog      │
/// │                                                                         │
/// │  3. Startup (concurrent) ─────────────────────────────────────────────► │
/// │     • catalog fetch + parse (failure: "Initialization Error")          │
/// │     • location permission + read (failure: "Not available")            │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CatalogState, FormState, ExportState                              │
/// │                                                                         │
/// │  5. Dispatch Command ─────────────────────────────────────────────────► │
/// │     • products / export / form (config skips steps 3-4)                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting Orderpad");

    let json = cli.json;
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, message = %err.message, "Command failed");
            if json {
                print_json(&err);
            } else {
                eprintln!("{}", err);
            }
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orderpad=trace` - Show trace for orderpad crates only
/// - Default: `info,orderpad=debug,reqwest=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orderpad=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration, applying command-line overrides last.
fn load_config(cli: &Cli) -> Result<OrderConfig, ApiError> {
    let mut config = OrderConfig::load(cli.config.clone())?;

    if cli.static_catalog {
        config.catalog.source = CatalogSourceKind::Static;
    }

    Ok(config)
}

async fn execute(cli: Cli) -> Result<(), ApiError> {
    let config = load_config(&cli)?;

    if let Commands::Config { write } = cli.command {
        return show_config(&config, cli.config, write, cli.json);
    }

    let source = CatalogSource::from_settings(&config.catalog);
    let location = ConfiguredLocation::new(&config.location);
    let startup = initialize(&source, &location).await?;

    info!(
        products = startup.catalog.len(),
        skipped = startup.catalog.skipped(),
        location = startup.location.is_some(),
        "App ready"
    );

    let app = AppState::new(CatalogState::from(startup));
    let exporter = Exporter::from_config(&config, share_target(cli.json));
    debug!(mode = %exporter.mode(), "Exporter ready");

    match cli.command {
        Commands::Products => {
            let rows = commands::catalog::list_products(&app.catalog, &app.form);
            if cli.json {
                print_json(&rows);
            } else {
                print!("{}", render::product_table(&rows));
            }
        }
        Commands::Export {
            quantities,
            store,
            vat,
            notes,
        } => {
            for (code, qty) in &quantities {
                commands::form::set_quantity(&app.catalog, &app.form, code, qty)?;
            }

            let fields = [
                (CustomerField::Store, store),
                (CustomerField::Vat, vat),
                (CustomerField::Notes, notes),
            ];
            for (field, value) in fields {
                if let Some(value) = value {
                    commands::form::set_customer_field(&app.form, field, &value)?;
                }
            }

            let response =
                commands::export::export_order(&app.catalog, &app.form, &app.export, &exporter)
                    .await?;
            if cli.json {
                print_json(&response);
            } else {
                print!("{}", render::export_result(&response));
            }
        }
        Commands::Form => {
            let input = BufReader::new(tokio::io::stdin());
            let mut output = tokio::io::stdout();
            session::run_session(&app, &exporter, input, &mut output)
                .await
                .map_err(|e| ApiError::internal(format!("Terminal I/O failed: {}", e)))?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Where the share fallback prints. With `--json`, stdout carries only the
/// JSON result.
fn share_target(json: bool) -> ConsoleTarget {
    if json {
        ConsoleTarget::Stderr
    } else {
        ConsoleTarget::Stdout
    }
}

/// Prints the effective configuration, optionally saving it first.
fn show_config(
    config: &OrderConfig,
    path: Option<PathBuf>,
    write: bool,
    json: bool,
) -> Result<(), ApiError> {
    if write {
        let saved = config.save(path)?;
        info!(path = %saved.display(), "Configuration written");
    }

    if json {
        print_json(config);
    } else {
        let text = toml::to_string_pretty(config)
            .map_err(|e| ApiError::internal(format!("Failed to render configuration: {}", e)))?;
        print!("{}", text);
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "Failed to serialize output"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_catalog_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orderpad.toml");
        std::fs::write(&path, "[catalog]\nsource = \"remote\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "orderpad",
            "--config",
            path.to_str().unwrap(),
            "--static-catalog",
            "products",
        ])
        .unwrap();

        let config = load_config(&cli).unwrap();
        assert_eq!(config.catalog.source, CatalogSourceKind::Static);
    }

    #[test]
    fn test_config_write_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("orderpad.toml");
        let config = OrderConfig::default();

        show_config(&config, Some(path.clone()), true, false).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[catalog]"));
        assert!(text.contains("album = \"Orders\""));
    }

    #[test]
    fn test_json_mode_keeps_share_output_off_stdout() {
        assert_eq!(share_target(true), ConsoleTarget::Stderr);
        assert_eq!(share_target(false), ConsoleTarget::Stdout);
    }

    #[test]
    fn test_bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orderpad.toml");
        std::fs::write(&path, "[catalog]\ntimeout_secs = 0\n").unwrap();

        let cli = Cli::try_parse_from(["orderpad", "--config", path.to_str().unwrap(), "form"])
            .unwrap();

        let err = load_config(&cli).unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigError);
    }
}
