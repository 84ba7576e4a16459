//! Per-symbol breakdown.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money::{percent, Pnl};
use crate::domain::Trade;

/// Performance of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolStats {
    pub symbol: String,
    pub trades: usize,
    pub wins: usize,
    pub net_pnl: Pnl,
    pub win_rate: f64,
}

/// One entry per symbol, highest net P/L first. Equal P/L sorts by symbol.
#[must_use]
pub fn by_symbol(trades: &[Trade]) -> Vec<SymbolStats> {
    let mut groups: HashMap<&str, (usize, usize, Decimal)> = HashMap::new();
    for trade in trades {
        let entry = groups.entry(trade.symbol()).or_default();
        entry.0 += 1;
        if trade.is_win() {
            entry.1 += 1;
        }
        entry.2 = entry.2.saturating_add(trade.profit_loss());
    }

    let mut stats: Vec<SymbolStats> = groups
        .into_iter()
        .map(|(symbol, (count, wins, net_pnl))| SymbolStats {
            symbol: symbol.to_string(),
            trades: count,
            wins,
            net_pnl,
            win_rate: percent(wins, count),
        })
        .collect();
    stats.sort_by(|a, b| b.net_pnl.cmp(&a.net_pnl).then_with(|| a.symbol.cmp(&b.symbol)));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::TradeBuilder;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_case_insensitively_and_sorts_by_pnl() {
        let trades = vec![
            TradeBuilder::with_pnl(dec!(10)).symbol("spy").build(),
            TradeBuilder::with_pnl(dec!(-4)).symbol("SPY").build(),
            TradeBuilder::with_pnl(dec!(50)).symbol("qqq").build(),
            TradeBuilder::with_pnl(dec!(-20)).symbol("iwm").build(),
        ];
        let stats = by_symbol(&trades);

        let order: Vec<&str> = stats.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(order, vec!["QQQ", "SPY", "IWM"]);
        assert_eq!(stats[1].trades, 2);
        assert_eq!(stats[1].wins, 1);
        assert_eq!(stats[1].net_pnl, dec!(6));
        assert_eq!(stats[1].win_rate, 50.0);
    }

    #[test]
    fn ties_sort_by_symbol() {
        let trades = vec![
            TradeBuilder::with_pnl(dec!(5)).symbol("ZZZ").build(),
            TradeBuilder::with_pnl(dec!(5)).symbol("AAA").build(),
        ];
        let stats = by_symbol(&trades);
        assert_eq!(stats[0].symbol, "AAA");
    }
}
