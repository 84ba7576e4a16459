//! Handler for the `stats` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::StatsArgs;
use crate::adapter::inbound::cli::output;
use crate::application::TradeManager;
use crate::config::DashboardConfig;
use crate::domain::{TradeFilter, TradeRecord};
use crate::error::Result;
use crate::metrics::{
    Dashboard, DashboardOptions, ExcursionSummary, PerformanceSummary, PriceBucketStats,
    StreakOrder, SymbolStats, WeekdayStats,
};

#[derive(Tabled)]
struct WeekdayRow {
    #[tabled(rename = "Day")]
    day: &'static str,
    #[tabled(rename = "Trades")]
    trades: usize,
    #[tabled(rename = "Win Rate")]
    win_rate: String,
    #[tabled(rename = "Net P/L")]
    net: String,
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Entry Price")]
    label: &'static str,
    #[tabled(rename = "Trades")]
    trades: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Net P/L")]
    net: String,
}

#[derive(Tabled)]
struct SymbolRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Trades")]
    trades: usize,
    #[tabled(rename = "Win Rate")]
    win_rate: String,
    #[tabled(rename = "Net P/L")]
    net: String,
}

#[derive(Tabled)]
struct RankRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Side")]
    side: &'static str,
    #[tabled(rename = "P/L")]
    pnl: String,
}

impl From<&WeekdayStats> for WeekdayRow {
    fn from(stats: &WeekdayStats) -> Self {
        Self {
            day: stats.weekday,
            trades: stats.trades,
            win_rate: output::percent(stats.win_rate),
            net: output::money(stats.net_pnl),
        }
    }
}

impl From<&PriceBucketStats> for BucketRow {
    fn from(stats: &PriceBucketStats) -> Self {
        Self {
            label: stats.label,
            trades: stats.trades,
            share: output::percent(stats.share_pct),
            net: output::money(stats.net_pnl),
        }
    }
}

impl From<&SymbolStats> for SymbolRow {
    fn from(stats: &SymbolStats) -> Self {
        Self {
            symbol: stats.symbol.clone(),
            trades: stats.trades,
            win_rate: output::percent(stats.win_rate),
            net: output::money(stats.net_pnl),
        }
    }
}

impl From<&TradeRecord> for RankRow {
    fn from(record: &TradeRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            symbol: record.symbol.clone(),
            side: record.direction.as_str(),
            pnl: output::money(record.profit_loss.unwrap_or_default()),
        }
    }
}

fn options(args: &StatsArgs, defaults: &DashboardConfig) -> DashboardOptions {
    let mut options = DashboardOptions::from(*defaults);
    if let Some(top) = args.top {
        options.ranking_size = top;
    }
    if args.chronological {
        options.streak_order = StreakOrder::Chronological;
    }
    options
}

/// Execute `stats`.
pub fn execute(manager: &TradeManager, args: StatsArgs, defaults: &DashboardConfig) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let options = options(&args, defaults);
    let filter = TradeFilter::from(args.filter);
    let snapshot = manager.snapshot();
    let dashboard = Dashboard::compute(&snapshot.trades, &filter, options);

    if output::is_json() {
        output::json_output(&json!({ "command": "stats", "dashboard": dashboard }));
        return Ok(());
    }

    if dashboard.summary.total_trades == 0 {
        output::note("no trades match");
        return Ok(());
    }

    print_summary(&dashboard.summary);
    print_excursion(&dashboard.excursion);

    output::section("By weekday");
    let rows: Vec<WeekdayRow> = dashboard
        .weekdays
        .iter()
        .filter(|w| w.trades > 0)
        .map(WeekdayRow::from)
        .collect();
    output::lines(&Table::new(rows).to_string());

    output::section("By entry price");
    let rows: Vec<BucketRow> = dashboard.price_buckets.iter().map(BucketRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    output::section("By symbol");
    let rows: Vec<SymbolRow> = dashboard.symbols.iter().map(SymbolRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    output::section(&format!("Best {}", dashboard.best.len()));
    let rows: Vec<RankRow> = dashboard.best.iter().map(RankRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    output::section(&format!("Worst {}", dashboard.worst.len()));
    let rows: Vec<RankRow> = dashboard.worst.iter().map(RankRow::from).collect();
    output::lines(&Table::new(rows).to_string());

    if let Some(last) = dashboard.equity.last() {
        output::section("Equity");
        output::field("Days traded", dashboard.equity.len());
        output::field("Final equity", output::pnl(last.equity));
    }

    Ok(())
}

fn print_summary(summary: &PerformanceSummary) {
    output::section("Performance");
    output::field("Trades", summary.total_trades);
    output::field(
        "Wins / losses",
        format!(
            "{} / {} ({} flat)",
            summary.wins, summary.losses, summary.break_even
        ),
    );
    output::field("Win rate", output::percent(summary.win_rate));
    output::field("Net P/L", output::pnl(summary.net_pnl));
    output::field("Gross profit", output::money(summary.gross_profit));
    output::field("Gross loss", output::money(summary.gross_loss));
    output::field("Profit factor", format!("{:.2}", summary.profit_factor));
    output::field("Average trade", output::pnl(summary.average_trade));
    output::field("Average win", output::money(summary.average_win));
    output::field("Average loss", output::money(summary.average_loss));
    output::field("Largest win", output::money(summary.largest_win));
    output::field("Largest loss", output::money(summary.largest_loss));
    output::field("Reward/risk", format!("{:.2}", summary.risk_reward));
    output::field("Max drawdown", output::percent(summary.max_drawdown_pct));

    output::section("Streaks");
    output::field("Longest win", summary.streaks.longest_win);
    output::field("Longest loss", summary.streaks.longest_loss);
    output::field("Current", format!("{:+}", summary.streaks.current));
}

fn print_excursion(excursion: &ExcursionSummary) {
    if excursion.tracked == 0 {
        return;
    }
    output::section("Excursion");
    output::field("Tracked trades", excursion.tracked);
    output::field(
        "Avg run-up",
        format!(
            "{} ({})",
            output::money(excursion.avg_mfe),
            output::percent(excursion.avg_mfe_pct)
        ),
    );
    output::field(
        "Avg drawdown",
        format!(
            "{} ({})",
            output::money(excursion.avg_mae),
            output::percent(excursion.avg_mae_pct)
        ),
    );
}
