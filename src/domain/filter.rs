//! Trade selection predicates for dashboard views.

use chrono::NaiveDate;

use super::trade::{Direction, Trade};

/// Optional constraints applied before metrics are computed.
///
/// Every unset field matches everything. Date bounds are inclusive and
/// compare the trade's calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub symbol: Option<String>,
    pub market: Option<String>,
    pub direction: Option<Direction>,
}

impl TradeFilter {
    /// Returns true if no constraint is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns true if the trade satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, trade: &Trade) -> bool {
        let day = trade.trade_date();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        if let Some(symbol) = &self.symbol {
            if !trade.matches_symbol(symbol) {
                return false;
            }
        }
        if let Some(market) = &self.market {
            if !trade.market().eq_ignore_ascii_case(market.trim()) {
                return false;
            }
        }
        if self.direction.is_some_and(|d| d != trade.direction()) {
            return false;
        }
        true
    }

    /// Matching trades, in their original order.
    #[must_use]
    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
