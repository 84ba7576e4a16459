//! Handler for the `calendar` command.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::TradeManager;
use crate::domain::DomainError;
use crate::error::Result;
use crate::metrics::{calendar_month, CalendarMonth};

#[derive(Tabled, Default)]
struct WeekRow {
    #[tabled(rename = "Sun")]
    sun: String,
    #[tabled(rename = "Mon")]
    mon: String,
    #[tabled(rename = "Tue")]
    tue: String,
    #[tabled(rename = "Wed")]
    wed: String,
    #[tabled(rename = "Thu")]
    thu: String,
    #[tabled(rename = "Fri")]
    fri: String,
    #[tabled(rename = "Sat")]
    sat: String,
}

impl WeekRow {
    fn cell(&mut self, index: u32) -> &mut String {
        match index {
            0 => &mut self.sun,
            1 => &mut self.mon,
            2 => &mut self.tue,
            3 => &mut self.wed,
            4 => &mut self.thu,
            5 => &mut self.fri,
            _ => &mut self.sat,
        }
    }
}

/// First day of the month named by `YYYY-MM`.
fn parse_month(raw: &str) -> std::result::Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| DomainError::malformed("month", raw))
}

/// Sunday-first weeks covering the month, one cell per day.
fn weeks(month: &CalendarMonth, first: NaiveDate) -> Vec<WeekRow> {
    let mut rows = Vec::new();
    let mut row = WeekRow::default();
    let mut date = first;
    while date.month() == first.month() {
        let column = date.weekday().num_days_from_sunday();
        if column == 0 && date != first {
            rows.push(std::mem::take(&mut row));
        }
        *row.cell(column) = match month.day(date) {
            Some(day) => format!("{} {}", date.day(), output::money(day.net_pnl)),
            None => date.day().to_string(),
        };
        date += Duration::days(1);
    }
    rows.push(row);
    rows
}

/// Execute `calendar [--month YYYY-MM]`.
pub fn execute(manager: &TradeManager, month: Option<&str>) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let first = match month {
        Some(raw) => parse_month(raw)?,
        None => Local::now().date_naive().with_day(1).unwrap_or_default(),
    };
    let snapshot = manager.snapshot();
    let calendar = calendar_month(&snapshot.trades, first.year(), first.month());

    if output::is_json() {
        output::json_output(&json!({ "command": "calendar", "calendar": calendar }));
        return Ok(());
    }

    output::section(&first.format("%B %Y").to_string());
    output::lines(&Table::new(weeks(&calendar, first)).to_string());
    output::field("Trading days", calendar.days.len());
    output::field("Trades", calendar.trades);
    output::field("Net P/L", output::pnl(calendar.net_pnl));
    Ok(())
}
