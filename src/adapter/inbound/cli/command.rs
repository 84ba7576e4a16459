//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tradebook application using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{BackendKind, Direction, TradeFilter};

/// Local trade journal with performance analytics
#[derive(Parser, Debug)]
#[command(name = "tradebook")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file [default: ~/.tradebook/config.toml]
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the tradebook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a closed trade
    Add(AddArgs),

    /// Edit fields of an existing trade
    Edit(EditArgs),

    /// Delete a trade
    Delete(DeleteArgs),

    /// List trades, newest first
    List(ListArgs),

    /// Delete every trade
    Clear(ClearArgs),

    /// Import trades from a JSON export
    Import(ImportArgs),

    /// Export all trades to a JSON file
    Export(ExportArgs),

    /// Show performance analytics
    Stats(StatsArgs),

    /// Show daily results for a month
    Calendar(CalendarArgs),

    /// Show or change the storage backend
    #[command(subcommand)]
    Backend(BackendCommand),

    /// Show or change preferences
    #[command(subcommand)]
    Preferences(PreferencesCommand),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `tradebook add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Ticker or contract symbol
    #[arg(long)]
    pub symbol: String,

    /// Entry price
    #[arg(long)]
    pub entry: String,

    /// Exit price
    #[arg(long)]
    pub exit: String,

    /// Position size (always positive)
    #[arg(long)]
    pub quantity: String,

    /// Trade time, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD` [default: now]
    #[arg(long)]
    pub date: Option<String>,

    /// Market classification (stock, futures, options, crypto, ...)
    #[arg(long, default_value = "stock")]
    pub market: String,

    /// long or short
    #[arg(long, default_value = "long")]
    pub direction: String,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Best unrealised P/L while the trade was open
    #[arg(long)]
    pub runup: Option<String>,

    /// Worst unrealised P/L while the trade was open
    #[arg(long)]
    pub drawdown: Option<String>,
}

/// Arguments for `tradebook edit`. Omitted fields keep their value.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Trade id
    pub id: String,

    #[arg(long)]
    pub symbol: Option<String>,

    #[arg(long)]
    pub entry: Option<String>,

    #[arg(long)]
    pub exit: Option<String>,

    #[arg(long)]
    pub quantity: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub market: Option<String>,

    #[arg(long)]
    pub direction: Option<String>,

    /// New notes (empty string removes them)
    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub runup: Option<String>,

    #[arg(long)]
    pub drawdown: Option<String>,
}

/// Arguments for `tradebook delete`.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Trade id
    pub id: String,
}

/// Trade selection shared by `list` and `stats`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// First trading day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last trading day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Only this symbol
    #[arg(long)]
    pub symbol: Option<String>,

    /// Only this market
    #[arg(long)]
    pub market: Option<String>,

    /// Only long or only short trades
    #[arg(long)]
    pub direction: Option<Direction>,
}

impl From<FilterArgs> for TradeFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            symbol: args.symbol,
            market: args.market,
            direction: args.direction,
        }
    }
}

/// Arguments for `tradebook list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show at most this many trades
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `tradebook clear`.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm deleting every trade
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for `tradebook import`.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file produced by `tradebook export`
    pub file: PathBuf,
}

/// Arguments for `tradebook export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory to write the export into
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

/// Arguments for `tradebook stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Size of the best/worst trade lists [default: from config]
    #[arg(long)]
    pub top: Option<usize>,

    /// Count streaks in trade-time order instead of journal order
    #[arg(long)]
    pub chronological: bool,
}

/// Arguments for `tradebook calendar`.
#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Month to show, `YYYY-MM` [default: current month]
    #[arg(long)]
    pub month: Option<String>,
}

/// Subcommands for `tradebook backend`.
#[derive(Subcommand, Debug)]
pub enum BackendCommand {
    /// Show the active backend
    Show,
    /// Move all trades to another backend
    Set {
        /// keyvalue or spreadsheet
        kind: BackendKind,
    },
}

/// Subcommands for `tradebook preferences`.
#[derive(Subcommand, Debug)]
pub enum PreferencesCommand {
    /// Show all preferences
    Show,
    /// Change one preference
    Set {
        /// backend, theme, defaultView, dateFormat, autoBackup.enabled,
        /// autoBackup.intervalDays
        key: String,
        value: String,
    },
}

/// Subcommands for `tradebook config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Display the effective configuration with defaults applied
    Show,
    /// Validate the configuration file
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_filter_flags() {
        let cli = Cli::parse_from([
            "tradebook",
            "stats",
            "--from",
            "2024-01-01",
            "--direction",
            "short",
            "--json",
        ]);
        assert!(cli.json);
        let Commands::Stats(args) = cli.command else {
            panic!("expected stats");
        };
        let filter = TradeFilter::from(args.filter);
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.direction, Some(Direction::Short));
    }

    #[test]
    fn parses_backend_kind() {
        let cli = Cli::parse_from(["tradebook", "backend", "set", "csv"]);
        assert!(matches!(
            cli.command,
            Commands::Backend(BackendCommand::Set {
                kind: BackendKind::Spreadsheet
            })
        ));
    }
}
