//! Handlers for `backend show` and `backend set`.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::TradeManager;
use crate::config::Config;
use crate::domain::BackendKind;
use crate::error::Result;

fn location(config: &Config, kind: BackendKind) -> String {
    match kind {
        BackendKind::KeyValue => config.storage.database_path(),
        BackendKind::Spreadsheet => config.storage.spreadsheet_path(),
    }
    .display()
    .to_string()
}

/// Execute `backend show`.
pub async fn show(manager: &TradeManager, config: &Config) -> Result<()> {
    let kind = manager.backend().await;
    let trades = manager.snapshot().trades.len();

    if output::is_json() {
        output::json_output(&json!({
            "command": "backend.show",
            "backend": kind,
            "location": location(config, kind),
            "trades": trades,
            "dirty": manager.is_dirty().await,
        }));
        return Ok(());
    }
    output::field("Backend", output::highlight(kind));
    output::field("Location", location(config, kind));
    output::field("Trades", trades);
    if manager.is_dirty().await {
        output::warning("last save failed; changes are only in memory");
    }
    Ok(())
}

/// Execute `backend set <kind>`.
pub async fn set(manager: &TradeManager, kind: BackendKind) -> Result<()> {
    let from = manager.backend().await;
    manager.set_backend(kind).await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "backend.set",
            "from": from,
            "to": kind,
            "trades": manager.snapshot().trades.len(),
        }));
        return Ok(());
    }
    if from == kind {
        output::note(&format!("already using {kind}"));
    } else {
        output::success(&format!(
            "moved {} trades from {from} to {}",
            manager.snapshot().trades.len(),
            output::highlight(kind)
        ));
    }
    Ok(())
}
