//! Handlers for `preferences show` and `preferences set`.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::application::TradeManager;
use crate::domain::Preferences;
use crate::error::Result;

fn print(preferences: &Preferences) {
    output::field("backend", preferences.backend);
    output::field("theme", format!("{:?}", preferences.theme).to_lowercase());
    output::field(
        "defaultView",
        format!("{:?}", preferences.default_view).to_lowercase(),
    );
    output::field("dateFormat", &preferences.date_format);
    output::field("autoBackup.enabled", preferences.auto_backup.enabled);
    output::field(
        "autoBackup.intervalDays",
        preferences.auto_backup.interval_days,
    );
}

/// Execute `preferences show`.
pub async fn show(manager: &TradeManager) -> Result<()> {
    let preferences = manager.preferences().await?;
    if output::is_json() {
        output::json_output(&json!({
            "command": "preferences.show",
            "preferences": preferences,
        }));
        return Ok(());
    }
    print(&preferences);
    Ok(())
}

/// Execute `preferences set <key> <value>`.
pub async fn set(manager: &TradeManager, key: &str, value: &str) -> Result<()> {
    let preferences = manager.set_preference(key, value).await?;
    if output::is_json() {
        output::json_output(&json!({
            "command": "preferences.set",
            "preferences": preferences,
        }));
        return Ok(());
    }
    output::success(&format!("{key} = {value}"));
    Ok(())
}
