//! Trade metrics engine.
//!
//! Every function here is pure: it takes a slice of trades and returns
//! derived values without touching storage. Empty input yields neutral
//! values (zeros, empty curves), never an error.

pub mod calendar;
pub mod equity;
pub mod excursion;
pub mod performance;
pub mod price_bucket;
pub mod ranking;
pub mod streak;
pub mod symbol;
pub mod weekday;

use serde::{Deserialize, Serialize};

use crate::domain::money::Pnl;
use crate::domain::{Trade, TradeFilter, TradeRecord};

pub use calendar::{calendar_month, CalendarDay, CalendarMonth};
pub use equity::{drawdown_curve, equity_curve, max_drawdown, DrawdownPoint, EquityPoint};
pub use excursion::{excursion_points, excursion_summary, ExcursionPoint, ExcursionSummary};
pub use price_bucket::{by_price_bucket, PriceBucketStats};
pub use ranking::{best_trades, worst_trades};
pub use streak::{streaks, StreakOrder, Streaks};
pub use symbol::{by_symbol, SymbolStats};
pub use weekday::{by_weekday, WeekdayStats};

/// Scalar performance figures for a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub break_even: usize,
    pub win_rate: f64,
    pub net_pnl: Pnl,
    pub gross_profit: Pnl,
    pub gross_loss: Pnl,
    pub profit_factor: f64,
    pub average_trade: Pnl,
    pub average_win: Pnl,
    pub average_loss: Pnl,
    pub largest_win: Pnl,
    pub largest_loss: Pnl,
    pub risk_reward: f64,
    pub max_drawdown_pct: f64,
    pub streaks: Streaks,
}

impl PerformanceSummary {
    #[must_use]
    pub fn compute(trades: &[Trade], order: StreakOrder) -> Self {
        let wins = trades.iter().filter(|t| t.is_win()).count();
        let losses = trades.iter().filter(|t| t.is_loss()).count();

        Self {
            total_trades: trades.len(),
            wins,
            losses,
            break_even: trades.len() - wins - losses,
            win_rate: performance::win_rate(trades),
            net_pnl: performance::net_pnl(trades),
            gross_profit: performance::gross_profit(trades),
            gross_loss: performance::gross_loss(trades),
            profit_factor: performance::profit_factor(trades),
            average_trade: performance::average_trade(trades),
            average_win: performance::average_win(trades),
            average_loss: performance::average_loss(trades),
            largest_win: performance::largest_win(trades),
            largest_loss: performance::largest_loss(trades),
            risk_reward: performance::risk_reward(trades),
            max_drawdown_pct: max_drawdown(trades),
            streaks: streaks(trades, order),
        }
    }
}

/// Dashboard computation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOptions {
    /// How many trades the best/worst lists hold.
    pub ranking_size: usize,
    pub streak_order: StreakOrder,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            ranking_size: 5,
            streak_order: StreakOrder::default(),
        }
    }
}

/// Everything the analytics views show, computed in one pass over a
/// filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub summary: PerformanceSummary,
    pub equity: Vec<EquityPoint>,
    pub drawdown: Vec<DrawdownPoint>,
    pub excursion: ExcursionSummary,
    pub weekdays: Vec<WeekdayStats>,
    pub price_buckets: Vec<PriceBucketStats>,
    pub symbols: Vec<SymbolStats>,
    pub best: Vec<TradeRecord>,
    pub worst: Vec<TradeRecord>,
}

impl Dashboard {
    #[must_use]
    pub fn compute(trades: &[Trade], filter: &TradeFilter, options: DashboardOptions) -> Self {
        let selected = filter.apply(trades);
        let equity = equity_curve(&selected);

        Self {
            summary: PerformanceSummary::compute(&selected, options.streak_order),
            drawdown: drawdown_curve(&equity),
            equity,
            excursion: excursion_summary(&selected),
            weekdays: by_weekday(&selected),
            price_buckets: by_price_bucket(&selected),
            symbols: by_symbol(&selected),
            best: records(&best_trades(&selected, options.ranking_size)),
            worst: records(&worst_trades(&selected, options.ranking_size)),
        }
    }
}

fn records(trades: &[Trade]) -> Vec<TradeRecord> {
    trades.iter().map(TradeRecord::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::testkit::domain::TradeBuilder;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_summary_is_neutral() {
        let summary = PerformanceSummary::compute(&[], StreakOrder::Storage);
        assert_eq!(summary, PerformanceSummary::default());
    }

    #[test]
    fn counts_break_even_separately() {
        let trades = vec![
            TradeBuilder::with_pnl(dec!(10)).build(),
            TradeBuilder::with_pnl(dec!(0)).build(),
            TradeBuilder::with_pnl(dec!(-5)).build(),
        ];
        let summary = PerformanceSummary::compute(&trades, StreakOrder::Storage);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.break_even, 1);
        assert_eq!(summary.profit_factor, 2.0);
    }

    #[test]
    fn dashboard_applies_filter_first() {
        let trades = vec![
            TradeBuilder::with_pnl(dec!(10)).symbol("AAA").build(),
            TradeBuilder::with_pnl(dec!(-30)).symbol("BBB").short().build(),
        ];
        let filter = TradeFilter {
            direction: Some(Direction::Long),
            ..Default::default()
        };
        let dashboard = Dashboard::compute(&trades, &filter, DashboardOptions::default());

        assert_eq!(dashboard.summary.total_trades, 1);
        assert_eq!(dashboard.symbols.len(), 1);
        assert_eq!(dashboard.weekdays.len(), 7);
        assert_eq!(dashboard.best.len(), 1);
        assert_eq!(dashboard.best[0].symbol, "AAA");
    }
}
