//! Best and worst trades.

use crate::domain::Trade;

/// Trades sorted by profit/loss, highest first.
///
/// The sort is stable: trades with equal P/L keep their collection order.
#[must_use]
pub fn ranked(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| b.profit_loss().cmp(&a.profit_loss()));
    sorted
}

/// The `n` most profitable trades, best first.
#[must_use]
pub fn best_trades(trades: &[Trade], n: usize) -> Vec<Trade> {
    ranked(trades).into_iter().take(n).cloned().collect()
}

/// The `n` least profitable trades, worst first.
#[must_use]
pub fn worst_trades(trades: &[Trade], n: usize) -> Vec<Trade> {
    ranked(trades).into_iter().rev().take(n).cloned().collect()
}
