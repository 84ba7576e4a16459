//! Daily equity and drawdown curves.
//!
//! The equity curve groups trades by calendar day, sums each day's P/L and
//! accumulates the daily totals in ascending date order. Days without trades
//! are not represented; the curve is not gap-filled.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money::{ratio, Pnl};
use crate::domain::Trade;

/// Net result of one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub net_pnl: Pnl,
    pub trades: usize,
}

/// One point of the cumulative equity curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    /// Net P/L of this day alone.
    pub daily_pnl: Pnl,
    /// Running total up to and including this day.
    pub equity: Pnl,
}

/// One point of the drawdown curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawdownPoint {
    pub date: NaiveDate,
    pub equity: Pnl,
    /// Highest equity seen up to and including this day.
    pub peak: Pnl,
    /// `(peak - equity) / peak * 100`, or `0` while the peak is not positive.
    pub drawdown_pct: f64,
}

/// Per-day totals in ascending date order.
#[must_use]
pub fn daily_totals(trades: &[Trade]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, (Pnl, usize)> = BTreeMap::new();
    for trade in trades {
        let entry = days
            .entry(trade.trade_date())
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(trade.profit_loss());
        entry.1 += 1;
    }
    days.into_iter()
        .map(|(date, (net_pnl, trades))| DailyTotal {
            date,
            net_pnl,
            trades,
        })
        .collect()
}

/// Cumulative equity by trading day.
#[must_use]
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut equity = Decimal::ZERO;
    daily_totals(trades)
        .into_iter()
        .map(|day| {
            equity = equity.saturating_add(day.net_pnl);
            EquityPoint {
                date: day.date,
                daily_pnl: day.net_pnl,
                equity,
            }
        })
        .collect()
}

/// Percentage drawdown from the running equity peak, per equity point.
///
/// While the peak is zero or negative the drawdown is reported as `0`. This
/// understates risk for accounts that never went positive.
#[must_use]
pub fn drawdown_curve(curve: &[EquityPoint]) -> Vec<DrawdownPoint> {
    let mut peak: Option<Pnl> = None;
    curve
        .iter()
        .map(|point| {
            let current_peak = peak.map_or(point.equity, |p| p.max(point.equity));
            peak = Some(current_peak);
            DrawdownPoint {
                date: point.date,
                equity: point.equity,
                peak: current_peak,
                drawdown_pct: drawdown_pct(current_peak, point.equity),
            }
        })
        .collect()
}

/// Deepest point of the drawdown curve, in percent.
#[must_use]
pub fn max_drawdown(trades: &[Trade]) -> f64 {
    drawdown_curve(&equity_curve(trades))
        .iter()
        .map(|p| p.drawdown_pct)
        .fold(0.0, f64::max)
}

fn drawdown_pct(peak: Pnl, equity: Pnl) -> f64 {
    if peak <= Decimal::ZERO {
        return 0.0;
    }
    let fall = peak.saturating_sub(equity);
    fall.checked_div(peak)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .map_or_else(|| ratio(fall, peak) * 100.0, |pct| pct.to_f64().unwrap_or(0.0))
}
