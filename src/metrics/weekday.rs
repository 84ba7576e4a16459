//! Day-of-week breakdown.

use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money::{percent, Pnl};
use crate::domain::Trade;

/// Weekdays in display order (Sunday first).
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Performance of trades taken on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStats {
    pub weekday: &'static str,
    pub net_pnl: Pnl,
    pub trades: usize,
    pub wins: usize,
    pub win_rate: f64,
    /// This weekday's share of all trades, in percent.
    pub share_pct: f64,
}

/// Full English weekday name.
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Seven buckets, Sunday to Saturday. Days without trades are included
/// with zeros.
#[must_use]
pub fn by_weekday(trades: &[Trade]) -> Vec<WeekdayStats> {
    let mut buckets = [(Decimal::ZERO, 0usize, 0usize); 7];
    for trade in trades {
        let slot = &mut buckets[trade.date().weekday().num_days_from_sunday() as usize];
        slot.0 = slot.0.saturating_add(trade.profit_loss());
        slot.1 += 1;
        if trade.is_win() {
            slot.2 += 1;
        }
    }

    WEEK.iter()
        .zip(buckets)
        .map(|(day, (net_pnl, count, wins))| WeekdayStats {
            weekday: weekday_name(*day),
            net_pnl,
            trades: count,
            wins,
            win_rate: percent(wins, count),
            share_pct: percent(count, trades.len()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::TradeBuilder;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_collection_yields_seven_zero_buckets() {
        let stats = by_weekday(&[]);
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].weekday, "Sunday");
        assert_eq!(stats[6].weekday, "Saturday");
        assert!(stats.iter().all(|s| s.trades == 0 && s.share_pct == 0.0));
    }

    #[test]
    fn buckets_by_local_weekday() {
        // 2024-06-03 is a Monday, 2024-06-07 a Friday.
        let trades = vec![
            TradeBuilder::with_pnl(dec!(30)).on("2024-06-03").build(),
            TradeBuilder::with_pnl(dec!(-10)).on("2024-06-03").build(),
            TradeBuilder::with_pnl(dec!(5)).on("2024-06-07").build(),
            TradeBuilder::with_pnl(dec!(5)).on("2024-06-10").build(),
        ];
        let stats = by_weekday(&trades);

        let monday = &stats[1];
        assert_eq!(monday.weekday, "Monday");
        assert_eq!(monday.trades, 3);
        assert_eq!(monday.wins, 2);
        assert_eq!(monday.net_pnl, dec!(25));
        assert_eq!(monday.share_pct, 75.0);

        let friday = &stats[5];
        assert_eq!(friday.trades, 1);
        assert_eq!(friday.win_rate, 100.0);
        assert_eq!(friday.share_pct, 25.0);
    }
}
