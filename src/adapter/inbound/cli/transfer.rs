//! Handlers for `import` and `export`.

use std::path::Path;

use chrono::Local;
use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::{transfer, TradeManager};
use crate::error::Result;

/// Execute `import <file>`.
///
/// The whole file is validated before anything is added.
pub async fn import(manager: &TradeManager, file: &Path) -> Result<()> {
    let trades = transfer::import_file(file)?;
    let count = manager.import_bulk(trades).await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "trades.import",
            "file": file.display().to_string(),
            "imported": count,
        }));
        return Ok(());
    }
    output::success(&format!("imported {count} trades from {}", file.display()));
    Ok(())
}

/// Execute `export`.
pub fn export(manager: &TradeManager, dir: &Path) -> Result<()> {
    let snapshot = manager.snapshot();
    let path = transfer::export_to_dir(&snapshot.trades, dir, Local::now().date_naive())?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "trades.export",
            "file": path.display().to_string(),
            "exported": snapshot.trades.len(),
        }));
        return Ok(());
    }
    output::success(&format!(
        "exported {} trades to {}",
        snapshot.trades.len(),
        output::highlight(path.display())
    ));
    Ok(())
}
