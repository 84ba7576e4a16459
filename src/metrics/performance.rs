//! Scalar performance metrics.
//!
//! Every function is total: an empty slice or a zero denominator yields a
//! neutral `0` rather than an error, NaN or infinity.

use rust_decimal::Decimal;

use crate::domain::money::{percent, ratio, total, Pnl};
use crate::domain::Trade;

/// Percentage of trades with positive P/L, in `[0, 100]`.
#[must_use]
pub fn win_rate(trades: &[Trade]) -> f64 {
    let wins = trades.iter().filter(|t| t.is_win()).count();
    percent(wins, trades.len())
}

/// Sum of all profit/loss.
#[must_use]
pub fn net_pnl(trades: &[Trade]) -> Pnl {
    total(trades.iter().map(Trade::profit_loss))
}

/// Sum of positive profit/loss.
#[must_use]
pub fn gross_profit(trades: &[Trade]) -> Pnl {
    total(
        trades
            .iter()
            .map(Trade::profit_loss)
            .filter(|pnl| *pnl > Decimal::ZERO),
    )
}

/// Sum of absolute negative profit/loss (a non-negative amount).
#[must_use]
pub fn gross_loss(trades: &[Trade]) -> Pnl {
    total(
        trades
            .iter()
            .map(Trade::profit_loss)
            .filter(|pnl| *pnl < Decimal::ZERO)
            .map(|pnl| pnl.abs()),
    )
}

/// Gross profit divided by gross loss.
///
/// Returns `0` when there are no losing trades, even if there are winners:
/// an all-winning record reports `0`, not infinity.
#[must_use]
pub fn profit_factor(trades: &[Trade]) -> f64 {
    ratio(gross_profit(trades), gross_loss(trades))
}

/// Mean profit/loss per trade.
#[must_use]
pub fn average_trade(trades: &[Trade]) -> Pnl {
    mean(&trades.iter().map(Trade::profit_loss).collect::<Vec<_>>())
}

/// Best single result, floored at `0`.
#[must_use]
pub fn largest_win(trades: &[Trade]) -> Pnl {
    trades
        .iter()
        .map(Trade::profit_loss)
        .fold(Decimal::ZERO, Decimal::max)
}

/// Worst single result, capped at `0` (a negative number or zero).
#[must_use]
pub fn largest_loss(trades: &[Trade]) -> Pnl {
    trades
        .iter()
        .map(Trade::profit_loss)
        .fold(Decimal::ZERO, Decimal::min)
}

/// Mean of winning P/L.
#[must_use]
pub fn average_win(trades: &[Trade]) -> Pnl {
    let wins: Vec<Pnl> = trades
        .iter()
        .map(Trade::profit_loss)
        .filter(|pnl| *pnl > Decimal::ZERO)
        .collect();
    mean(&wins)
}

/// Mean of absolute losing P/L (a non-negative amount).
#[must_use]
pub fn average_loss(trades: &[Trade]) -> Pnl {
    let losses: Vec<Pnl> = trades
        .iter()
        .map(Trade::profit_loss)
        .filter(|pnl| *pnl < Decimal::ZERO)
        .map(|pnl| pnl.abs())
        .collect();
    mean(&losses)
}

/// Average win over average loss, `0` when there are no losses.
#[must_use]
pub fn risk_reward(trades: &[Trade]) -> f64 {
    ratio(average_win(trades), average_loss(trades))
}

pub(crate) fn mean(values: &[Pnl]) -> Pnl {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    total(values.iter().copied()) / Decimal::from(values.len())
}
