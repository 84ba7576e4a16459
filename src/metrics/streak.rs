//! Consecutive win/loss streaks.

use serde::{Deserialize, Serialize};

use crate::domain::Trade;

/// Order in which trades are scanned for streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakOrder {
    /// The collection's own order (newest-first for journaled trades).
    #[default]
    Storage,
    /// Ascending by trade timestamp; ties keep storage order.
    Chronological,
}

/// Streak summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streaks {
    pub longest_win: usize,
    pub longest_loss: usize,
    /// Signed streak at the end of the scan: positive for wins, negative
    /// for losses, `0` for an empty collection.
    pub current: i64,
}

/// Scan trades with a signed streak counter.
///
/// A win (`pnl > 0`) after a win increments the counter, after a loss it
/// resets it to `1`. Anything else (including break-even) decrements after
/// a loss and resets to `-1` after a win.
#[must_use]
pub fn streaks(trades: &[Trade], order: StreakOrder) -> Streaks {
    let ordered: Vec<&Trade> = match order {
        StreakOrder::Storage => trades.iter().collect(),
        StreakOrder::Chronological => {
            let mut sorted: Vec<&Trade> = trades.iter().collect();
            sorted.sort_by_key(|t| t.date());
            sorted
        }
    };

    let mut streak: i64 = 0;
    let mut best: i64 = 0;
    let mut worst: i64 = 0;

    for trade in ordered {
        streak = if trade.is_win() {
            if streak > 0 {
                streak + 1
            } else {
                1
            }
        } else if streak < 0 {
            streak - 1
        } else {
            -1
        };
        best = best.max(streak);
        worst = worst.min(streak);
    }

    Streaks {
        longest_win: best.unsigned_abs() as usize,
        longest_loss: worst.unsigned_abs() as usize,
        current: streak,
    }
}
