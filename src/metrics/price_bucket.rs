//! Performance by entry-price range.
//!
//! Ranges are half-open `[min, max)`: a trade entered at exactly `$5` falls
//! in `$5-$10`, not `$2-$5`. The last range has no upper bound.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money::{percent, Pnl, Price};
use crate::domain::Trade;

/// Upper bounds of every range but the last.
const BOUNDS: [u32; 9] = [2, 5, 10, 20, 50, 100, 200, 500, 1000];

const LABELS: [&str; 10] = [
    "< $2",
    "$2-$5",
    "$5-$10",
    "$10-$20",
    "$20-$50",
    "$50-$100",
    "$100-$200",
    "$200-$500",
    "$500-$1000",
    "$1000+",
];

/// Aggregated result for one price range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBucketStats {
    pub label: &'static str,
    /// Inclusive lower bound (`0` for the first range).
    pub min: Price,
    /// Exclusive upper bound, `None` for the last range.
    pub max: Option<Price>,
    pub trades: usize,
    pub net_pnl: Pnl,
    /// Share of all trades in this range, in percent.
    pub share_pct: f64,
}

/// Index of the range containing `price`.
#[must_use]
pub fn bucket_index(price: Price) -> usize {
    BOUNDS
        .iter()
        .position(|bound| price < Decimal::from(*bound))
        .unwrap_or(BOUNDS.len())
}

/// Non-empty price ranges in ascending price order.
#[must_use]
pub fn by_price_bucket(trades: &[Trade]) -> Vec<PriceBucketStats> {
    let mut buckets = [(0usize, Decimal::ZERO); LABELS.len()];
    for trade in trades {
        let slot = &mut buckets[bucket_index(trade.entry_price())];
        slot.0 += 1;
        slot.1 = slot.1.saturating_add(trade.profit_loss());
    }

    buckets
        .iter()
        .enumerate()
        .filter(|(_, (count, _))| *count > 0)
        .map(|(i, (count, net_pnl))| PriceBucketStats {
            label: LABELS[i],
            min: if i == 0 {
                Decimal::ZERO
            } else {
                Decimal::from(BOUNDS[i - 1])
            },
            max: BOUNDS.get(i).map(|b| Decimal::from(*b)),
            trades: *count,
            net_pnl: *net_pnl,
            share_pct: percent(*count, trades.len()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::TradeBuilder;
    use rust_decimal_macros::dec;

    fn entered_at(price: Decimal) -> Trade {
        TradeBuilder::new("X")
            .entry(price)
            .exit(price + dec!(1))
            .quantity(dec!(1))
            .build()
    }

    #[test]
    fn boundaries_are_half_open() {
        assert_eq!(bucket_index(dec!(1.99)), 0);
        assert_eq!(bucket_index(dec!(2)), 1);
        assert_eq!(bucket_index(dec!(4.99)), 1);
        assert_eq!(bucket_index(dec!(5)), 2);
        assert_eq!(bucket_index(dec!(999.99)), 8);
        assert_eq!(bucket_index(dec!(1000)), 9);
        assert_eq!(bucket_index(dec!(25000)), 9);
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let trades = vec![entered_at(dec!(3)), entered_at(dec!(4)), entered_at(dec!(1500))];
        let stats = by_price_bucket(&trades);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].label, "$2-$5");
        assert_eq!(stats[0].trades, 2);
        assert_eq!(stats[0].net_pnl, dec!(2));
        assert_eq!(stats[0].min, dec!(2));
        assert_eq!(stats[0].max, Some(dec!(5)));
        assert_eq!(stats[1].label, "$1000+");
        assert_eq!(stats[1].max, None);
    }

    #[test]
    fn shares_sum_to_hundred() {
        let trades = vec![
            entered_at(dec!(1)),
            entered_at(dec!(60)),
            entered_at(dec!(70)),
            entered_at(dec!(300)),
        ];
        let stats = by_price_bucket(&trades);
        let total: f64 = stats.iter().map(|s| s.share_pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(stats[1].share_pct, 50.0);
    }

    #[test]
    fn empty_collection_has_no_buckets() {
        assert!(by_price_bucket(&[]).is_empty());
    }
}
