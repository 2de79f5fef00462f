//! # Command Line
//!
//! ```text
//! orderpad [--config PATH] [--static-catalog] [--json] <COMMAND>
//!
//!   products                       list the catalog
//!   export --qty 001=2 --store X   one-shot export
//!   form                           interactive order entry
//!   config [--write]               show (and save) the configuration
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Orderpad order entry", long_about = None)]
pub struct Cli {
    /// Config file (defaults to orderpad.toml in the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the built-in catalog instead of fetching the remote sheet
    #[arg(long, global = true)]
    pub static_catalog: bool,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the products in the catalog
    Products,

    /// Export an order in one go
    Export {
        /// Quantity for a product, as CODE=QTY (repeatable)
        #[arg(long = "qty", value_name = "CODE=QTY", value_parser = parse_quantity_arg)]
        quantities: Vec<(String, String)>,

        /// Store name
        #[arg(long)]
        store: Option<String>,

        /// VAT / tax ID
        #[arg(long)]
        vat: Option<String>,

        /// Order notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Enter an order interactively
    Form,

    /// Show the effective configuration
    Config {
        /// Write it to the config file as well
        #[arg(long)]
        write: bool,
    },
}

/// Splits `CODE=QTY`. The quantity itself is validated later, against the
/// same rules as interactive input.
pub fn parse_quantity_arg(arg: &str) -> Result<(String, String), String> {
    let (code, qty) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=QTY, got '{}'", arg))?;

    let code = code.trim();
    if code.is_empty() {
        return Err(format!("missing product code in '{}'", arg));
    }

    Ok((code.to_string(), qty.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_arg() {
        assert_eq!(
            parse_quantity_arg("001=2").unwrap(),
            ("001".to_string(), "2".to_string())
        );
        assert_eq!(
            parse_quantity_arg(" 002 = 10 ").unwrap(),
            ("002".to_string(), "10".to_string())
        );
        assert!(parse_quantity_arg("002").is_err());
        assert!(parse_quantity_arg("=3").is_err());
    }

    #[test]
    fn test_parse_export_command() {
        let cli = Cli::try_parse_from([
            "orderpad",
            "--static-catalog",
            "export",
            "--qty",
            "001=2",
            "--qty",
            "004=1",
            "--store",
            "Acme",
        ])
        .unwrap();

        assert!(cli.static_catalog);
        match cli.command {
            Commands::Export {
                quantities, store, ..
            } => {
                assert_eq!(quantities.len(), 2);
                assert_eq!(store.as_deref(), Some("Acme"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
