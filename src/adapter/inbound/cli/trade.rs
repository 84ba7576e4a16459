//! Handlers for `add`, `edit`, `delete`, `list` and `clear`.

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDateTime};
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{AddArgs, EditArgs, ListArgs};
use crate::adapter::inbound::cli::output;
use crate::application::TradeManager;
use crate::domain::parse::{parse_decimal, parse_timestamp, timestamp};
use crate::domain::{Trade, TradeFilter, TradeId, TradeParams, TradeRecord, TradeText};
use crate::error::{Error, Result};

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Side")]
    side: &'static str,
    #[tabled(rename = "Qty")]
    quantity: String,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Exit")]
    exit: String,
    #[tabled(rename = "P/L")]
    pnl: String,
}

impl TradeRow {
    fn new(trade: &Trade, date_format: &str) -> Self {
        Self {
            id: trade.id().to_string(),
            date: format_date(trade.date(), date_format),
            symbol: trade.symbol().to_string(),
            market: trade.market().to_string(),
            side: trade.direction().as_str(),
            quantity: trade.quantity().normalize().to_string(),
            entry: trade.entry_price().normalize().to_string(),
            exit: trade.exit_price().normalize().to_string(),
            pnl: output::money(trade.profit_loss()),
        }
    }
}

/// Format a timestamp with a user-supplied strftime pattern, falling back
/// to the wire format when the pattern is invalid.
pub(crate) fn format_date(date: NaiveDateTime, pattern: &str) -> String {
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let pattern = if valid { pattern } else { timestamp::WIRE_FORMAT };
    date.format(pattern).to_string()
}

fn describe(trade: &Trade) -> String {
    format!(
        "{} {} {} @ {} → {}",
        trade.symbol(),
        trade.direction(),
        trade.quantity().normalize(),
        trade.entry_price().normalize(),
        trade.exit_price().normalize()
    )
}

async fn date_format(manager: &TradeManager) -> String {
    match manager.preferences().await {
        Ok(preferences) => preferences.date_format,
        Err(_) => timestamp::WIRE_FORMAT.to_string(),
    }
}

/// Execute `add`.
pub async fn add(manager: &TradeManager, args: &AddArgs) -> Result<()> {
    let now = Local::now()
        .naive_local()
        .format(timestamp::WIRE_FORMAT)
        .to_string();
    let text = TradeText {
        symbol: &args.symbol,
        market: &args.market,
        entry_price: &args.entry,
        exit_price: &args.exit,
        quantity: &args.quantity,
        date: args.date.as_deref().unwrap_or(&now),
        notes: args.notes.as_deref().unwrap_or_default(),
        direction: &args.direction,
        max_runup: args.runup.as_deref().unwrap_or_default(),
        max_drawdown: args.drawdown.as_deref().unwrap_or_default(),
    };
    let trade = TradeParams::parse(&text)?.build()?;
    let record = TradeRecord::from(&trade);
    let pnl = trade.profit_loss();
    let summary = describe(&trade);

    manager.add(trade).await?;

    if output::is_json() {
        output::json_output(&json!({ "command": "trades.add", "trade": record }));
        return Ok(());
    }
    output::success(&format!("recorded {summary}"));
    output::field("P/L", output::pnl(pnl));
    if let Some(id) = &record.id {
        output::field("ID", output::muted(id));
    }
    Ok(())
}

/// Execute `edit <id>`.
pub async fn edit(manager: &TradeManager, args: &EditArgs) -> Result<()> {
    let id = TradeId::from(args.id.trim());
    let existing = manager
        .find(&id)
        .ok_or_else(|| Error::TradeNotFound(id.clone()))?;
    let mut params = existing.params();

    if let Some(symbol) = &args.symbol {
        params.symbol.clone_from(symbol);
    }
    if let Some(market) = &args.market {
        params.market.clone_from(market);
    }
    if let Some(entry) = &args.entry {
        params.entry_price = parse_decimal("entryPrice", entry)?;
    }
    if let Some(exit) = &args.exit {
        params.exit_price = parse_decimal("exitPrice", exit)?;
    }
    if let Some(quantity) = &args.quantity {
        params.quantity = parse_decimal("quantity", quantity)?;
    }
    if let Some(date) = &args.date {
        params.date = parse_timestamp(date)?;
    }
    if let Some(direction) = &args.direction {
        params.direction = direction.parse()?;
    }
    if let Some(notes) = &args.notes {
        params.notes = Some(notes.clone());
    }
    if let Some(runup) = &args.runup {
        params.max_runup = Some(parse_decimal("maxRunup", runup)?);
    }
    if let Some(drawdown) = &args.drawdown {
        params.max_drawdown = Some(parse_decimal("maxDrawdown", drawdown)?);
    }

    let trade = params.build_with_id(id)?;
    let record = TradeRecord::from(&trade);
    let summary = describe(&trade);
    let pnl = trade.profit_loss();
    manager.update(trade).await?;

    if output::is_json() {
        output::json_output(&json!({ "command": "trades.edit", "trade": record }));
        return Ok(());
    }
    output::success(&format!("updated {summary}"));
    output::field("P/L", output::pnl(pnl));
    Ok(())
}

/// Execute `delete <id>`.
pub async fn delete(manager: &TradeManager, id: &str) -> Result<()> {
    let removed = manager.delete(&TradeId::from(id.trim())).await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "trades.delete",
            "trade": TradeRecord::from(&removed),
        }));
        return Ok(());
    }
    output::success(&format!("deleted {}", describe(&removed)));
    Ok(())
}

/// Execute `list`.
pub async fn list(manager: &TradeManager, args: ListArgs) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let filter = TradeFilter::from(args.filter);
    let snapshot = manager.snapshot();
    let mut trades = filter.apply(&snapshot.trades);
    trades.sort_by(|a, b| b.date().cmp(&a.date()));
    if let Some(limit) = args.limit {
        trades.truncate(limit);
    }

    if output::is_json() {
        let records: Vec<TradeRecord> = trades.iter().map(TradeRecord::from).collect();
        output::json_output(&json!({ "command": "trades.list", "trades": records }));
        return Ok(());
    }

    if trades.is_empty() {
        output::note("no trades");
        if snapshot.trades.is_empty() {
            output::hint(&format!(
                "record one with {}",
                output::highlight("tradebook add --symbol <SYM> --entry <P> --exit <P> --quantity <N>")
            ));
        }
        return Ok(());
    }

    let pattern = date_format(manager).await;
    let rows: Vec<TradeRow> = trades.iter().map(|t| TradeRow::new(t, &pattern)).collect();
    output::lines(&Table::new(rows).to_string());
    output::note(&format!("{} of {} trades", trades.len(), snapshot.trades.len()));
    Ok(())
}

/// Execute `clear`.
pub async fn clear(manager: &TradeManager, confirmed: bool) -> Result<()> {
    if !confirmed {
        output::warning("refusing to delete every trade without confirmation");
        output::hint(&format!("run {}", output::highlight("tradebook clear --yes")));
        return Ok(());
    }

    let removed = manager.clear().await?;
    if output::is_json() {
        output::json_output(&json!({ "command": "trades.clear", "removed": removed }));
        return Ok(());
    }
    output::success(&format!("deleted {removed} trades"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::day;

    #[test]
    fn formats_with_user_pattern() {
        assert_eq!(format_date(day("2024-03-05"), "%d/%m/%Y %H:%M"), "05/03/2024 12:00");
    }

    #[test]
    fn invalid_pattern_falls_back_to_wire_format() {
        assert_eq!(format_date(day("2024-03-05"), "%Y-%m-%"), "2024-03-05T12:00:00");
    }
}
