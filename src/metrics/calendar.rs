//! Monthly calendar view.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::money::{total, Pnl};
use crate::domain::Trade;

use super::equity::daily_totals;

/// One trading day in a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub net_pnl: Pnl,
    pub trades: usize,
}

/// Trading days of a month plus the month total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Days with at least one trade, ascending.
    pub days: Vec<CalendarDay>,
    pub net_pnl: Pnl,
    pub trades: usize,
}

impl CalendarMonth {
    /// Entry for `date`, if it was a trading day.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Daily results for `year`/`month`. Trades outside the month are ignored.
#[must_use]
pub fn calendar_month(trades: &[Trade], year: i32, month: u32) -> CalendarMonth {
    let in_month: Vec<Trade> = trades
        .iter()
        .filter(|t| t.trade_date().year() == year && t.trade_date().month() == month)
        .cloned()
        .collect();

    let days: Vec<CalendarDay> = daily_totals(&in_month)
        .into_iter()
        .map(|d| CalendarDay {
            date: d.date,
            net_pnl: d.net_pnl,
            trades: d.trades,
        })
        .collect();

    CalendarMonth {
        year,
        month,
        net_pnl: total(days.iter().map(|d| d.net_pnl)),
        trades: days.iter().map(|d| d.trades).sum(),
        days,
    }
}
