//! Maximum favorable / adverse excursion (MFE / MAE).
//!
//! Excursions come from the optional `maxRunup` / `maxDrawdown`
//! annotations. Trades without an annotation contribute `0` to every
//! average, so the averages are taken over the whole collection.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money::{ratio, Pnl};
use crate::domain::{Trade, TradeId};

use super::performance::mean;

/// Excursion of a single trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcursionPoint {
    pub id: TradeId,
    pub symbol: String,
    pub profit_loss: Pnl,
    /// Best unrealised P/L (non-negative).
    pub mfe: Pnl,
    /// Magnitude of the worst unrealised P/L (non-negative).
    pub mae: Pnl,
    /// MFE as a percentage of entry notional.
    pub mfe_pct: f64,
    /// MAE as a percentage of entry notional.
    pub mae_pct: f64,
}

/// Collection-wide excursion averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExcursionSummary {
    /// Trades carrying at least one annotation.
    pub tracked: usize,
    pub avg_mfe: Pnl,
    pub avg_mae: Pnl,
    /// Average MFE per unit of quantity.
    pub avg_mfe_per_unit: Decimal,
    /// Average MAE per unit of quantity.
    pub avg_mae_per_unit: Decimal,
    pub avg_mfe_pct: f64,
    pub avg_mae_pct: f64,
}

fn mfe(trade: &Trade) -> Pnl {
    trade.max_runup().unwrap_or(Decimal::ZERO)
}

fn mae(trade: &Trade) -> Pnl {
    trade.max_drawdown().map_or(Decimal::ZERO, |d| d.abs())
}

fn pct_of_notional(amount: Pnl, trade: &Trade) -> f64 {
    amount.checked_mul(Decimal::ONE_HUNDRED).map_or_else(
        || ratio(amount, trade.notional()) * 100.0,
        |scaled| ratio(scaled, trade.notional()),
    )
}

/// Excursion per unit of quantity, clamped at [`Decimal::MAX`] for
/// quantities too small to divide by.
fn per_unit(amount: Pnl, trade: &Trade) -> Decimal {
    amount
        .checked_div(trade.quantity())
        .unwrap_or(Decimal::MAX)
}

/// Per-trade excursion points, in collection order.
#[must_use]
pub fn excursion_points(trades: &[Trade]) -> Vec<ExcursionPoint> {
    trades
        .iter()
        .map(|trade| {
            let mfe = mfe(trade);
            let mae = mae(trade);
            ExcursionPoint {
                id: trade.id().clone(),
                symbol: trade.symbol().to_string(),
                profit_loss: trade.profit_loss(),
                mfe,
                mae,
                mfe_pct: pct_of_notional(mfe, trade),
                mae_pct: pct_of_notional(mae, trade),
            }
        })
        .collect()
}

/// Average excursions across the collection.
#[must_use]
pub fn excursion_summary(trades: &[Trade]) -> ExcursionSummary {
    if trades.is_empty() {
        return ExcursionSummary::default();
    }

    let tracked = trades
        .iter()
        .filter(|t| t.max_runup().is_some() || t.max_drawdown().is_some())
        .count();
    let mfes: Vec<Pnl> = trades.iter().map(mfe).collect();
    let maes: Vec<Pnl> = trades.iter().map(mae).collect();
    let mfe_per_unit: Vec<Decimal> = trades.iter().map(|t| per_unit(mfe(t), t)).collect();
    let mae_per_unit: Vec<Decimal> = trades.iter().map(|t| per_unit(mae(t), t)).collect();
    let count = trades.len() as f64;

    ExcursionSummary {
        tracked,
        avg_mfe: mean(&mfes),
        avg_mae: mean(&maes),
        avg_mfe_per_unit: mean(&mfe_per_unit),
        avg_mae_per_unit: mean(&mae_per_unit),
        avg_mfe_pct: trades.iter().map(|t| pct_of_notional(mfe(t), t)).sum::<f64>() / count,
        avg_mae_pct: trades.iter().map(|t| pct_of_notional(mae(t), t)).sum::<f64>() / count,
    }
}
