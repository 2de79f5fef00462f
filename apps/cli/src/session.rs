//! # Interactive Form
//!
//! A line-oriented version of the order screen. Each line is one action;
//! failures print a notice and the session carries on.
//!
//! ```text
//! > list
//! 001  Toy Car       Red die-cast car         []
//! > qty 001 2
//! > store Corner Shop
//! > export
//! Success: File saved to Downloads/Orders/order_2024-05-01T10-20-30-123Z.csv
//! > quit
//! ```

use orderpad_core::CustomerField;
use orderpad_platform::Exporter;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::commands::{catalog, export, form, Notice};
use crate::error::ApiError;
use crate::render;
use crate::state::AppState;

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  list                    show products and entered quantities
  qty CODE [QTY]          set a quantity (no QTY clears it)
  store|vat|notes [TEXT]  set a customer field (\\n in notes starts a new line)
  show                    show the current order
  export                  export the order
  reset                   clear the form
  help                    show this help
  quit                    leave
";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    List,
    Quantity { code: String, input: String },
    Customer { field: CustomerField, value: String },
    Show,
    Export,
    Reset,
    Help,
    Quit,
    Empty,
}

fn parse_line(line: &str) -> Result<Action, ApiError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let action = match word.to_lowercase().as_str() {
        "" => Action::Empty,
        "list" | "products" => Action::List,
        "qty" | "q" => {
            let mut parts = rest.split_whitespace();
            let code = parts
                .next()
                .ok_or_else(|| ApiError::validation("Usage: qty CODE [QTY]"))?;
            Action::Quantity {
                code: code.to_string(),
                input: parts.next().unwrap_or_default().to_string(),
            }
        }
        "store" | "vat" | "notes" => Action::Customer {
            field: word.parse()?,
            value: rest.replace("\\n", "\n"),
        },
        "show" => Action::Show,
        "export" => Action::Export,
        "reset" => Action::Reset,
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => {
            return Err(ApiError::validation(format!(
                "Unknown command '{}', type 'help' for a list",
                other
            )))
        }
    };

    Ok(action)
}

/// Runs the interactive form until `quit` or end of input.
pub async fn run_session<R, W>(
    app: &AppState,
    exporter: &Exporter,
    input: R,
    output: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output.write_all(HELP.as_bytes()).await?;
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        debug!(line = %line, "Session input");

        let reply = match parse_line(&line) {
            Ok(Action::Quit) => break,
            Ok(action) => apply(app, exporter, action).await,
            Err(err) => Err(err),
        };

        match reply {
            Ok(text) => output.write_all(text.as_bytes()).await?,
            Err(err) => {
                let notice = Notice::from(&err);
                output.write_all(format!("{}\n", notice).as_bytes()).await?;
            }
        }

        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;
    }

    output.flush().await
}

async fn apply(app: &AppState, exporter: &Exporter, action: Action) -> Result<String, ApiError> {
    let text = match action {
        Action::List => render::product_table(&catalog::list_products(&app.catalog, &app.form)),
        Action::Quantity { code, input } => {
            form::set_quantity(&app.catalog, &app.form, &code, &input)?;
            String::new()
        }
        Action::Customer { field, value } => {
            form::set_customer_field(&app.form, field, &value)?;
            String::new()
        }
        Action::Show => render::order_summary(&app.catalog, &form::get_form(&app.form)),
        Action::Export => {
            let response = export::export_order(&app.catalog, &app.form, &app.export, exporter)
                .await?;
            render::export_result(&response)
        }
        Action::Reset => {
            form::reset_form(&app.form);
            String::new()
        }
        Action::Help => HELP.to_string(),
        Action::Quit | Action::Empty => String::new(),
    };

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CatalogState;
    use orderpad_core::Catalog;
    use orderpad_platform::{ConsoleShare, ExportMode, LocalFileStore};
    use std::sync::Arc;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("list").unwrap(), Action::List);
        assert_eq!(
            parse_line("qty 001 5").unwrap(),
            Action::Quantity {
                code: "001".into(),
                input: "5".into()
            }
        );
        assert_eq!(
            parse_line("qty 001").unwrap(),
            Action::Quantity {
                code: "001".into(),
                input: String::new()
            }
        );
        assert_eq!(
            parse_line("notes call first\\nback door").unwrap(),
            Action::Customer {
                field: CustomerField::Notes,
                value: "call first\nback door".into()
            }
        );
        assert_eq!(parse_line("   ").unwrap(), Action::Empty);
        assert!(parse_line("qty").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[tokio::test]
    async fn test_session_enters_and_exports_order() {
        let dir = tempfile::tempdir().unwrap();
        let app = AppState::new(CatalogState::new(Catalog::builtin(), None));
        let store = LocalFileStore::new(dir.path(), "Orders");
        let exporter = Exporter::new(
            ExportMode::SaveWithShareFallback,
            Arc::new(store),
            Arc::new(ConsoleShare::default()),
            dir.path().join("cache"),
        );

        let script = "qty 001 2\nqty 001 2x\nstore Corner Shop\nexport\nquit\nqty 002 1\n";
        let mut output = Vec::new();
        run_session(&app, &exporter, script.as_bytes(), &mut output)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Invalid Input:"));
        assert!(output.contains("Success: File saved to Downloads/Orders/order_"));

        // input after quit is ignored
        let form = app.form.snapshot();
        assert_eq!(form.quantities.raw("001"), Some("2"));
        assert_eq!(form.quantities.raw("002"), None);
        assert_eq!(form.customer.store, "Corner Shop");
    }

    #[tokio::test]
    async fn test_session_reports_no_products() {
        let dir = tempfile::tempdir().unwrap();
        let app = AppState::new(CatalogState::new(Catalog::builtin(), None));
        let exporter = Exporter::new(
            ExportMode::SaveWithShareFallback,
            Arc::new(LocalFileStore::new(dir.path(), "Orders")),
            Arc::new(ConsoleShare::default()),
            dir.path().join("cache"),
        );

        let mut output = Vec::new();
        run_session(&app, &exporter, "export\n".as_bytes(), &mut output)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("No Products: Please add quantities to at least one product"));
    }
}
