//! Dashboard defaults.

use serde::{Deserialize, Serialize};

use crate::metrics::{DashboardOptions, StreakOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Size of the best/worst trade lists.
    pub ranking_size: usize,
    pub streak_order: StreakOrder,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let options = DashboardOptions::default();
        Self {
            ranking_size: options.ranking_size,
            streak_order: options.streak_order,
        }
    }
}

impl From<DashboardConfig> for DashboardOptions {
    fn from(config: DashboardConfig) -> Self {
        Self {
            ranking_size: config.ranking_size,
            streak_order: config.streak_order,
        }
    }
}
