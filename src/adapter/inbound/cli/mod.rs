//! CLI module graph and command dispatch.

pub mod backend;
pub mod calendar;
pub mod command;
pub mod config;
pub mod output;
pub mod preferences;
pub mod stats;
pub mod trade;
pub mod transfer;

use std::path::Path;

use crate::application::TradeManager;
use crate::config::Config;
use crate::error::Result;

use command::{BackendCommand, Commands, PreferencesCommand};

/// Run one command against a loaded manager.
///
/// `config` subcommands normally run before any storage is opened; see
/// [`config::execute`].
///
/// # Errors
///
/// Returns whatever the command's handler returns.
pub async fn execute(
    command: Commands,
    manager: &TradeManager,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    match command {
        Commands::Add(args) => trade::add(manager, &args).await,
        Commands::Edit(args) => trade::edit(manager, &args).await,
        Commands::Delete(args) => trade::delete(manager, &args.id).await,
        Commands::List(args) => trade::list(manager, args).await,
        Commands::Clear(args) => trade::clear(manager, args.yes).await,
        Commands::Import(args) => transfer::import(manager, &args.file).await,
        Commands::Export(args) => transfer::export(manager, &args.dir),
        Commands::Stats(args) => stats::execute(manager, args, &config.dashboard),
        Commands::Calendar(args) => calendar::execute(manager, args.month.as_deref()),
        Commands::Backend(BackendCommand::Show) => backend::show(manager, config).await,
        Commands::Backend(BackendCommand::Set { kind }) => backend::set(manager, kind).await,
        Commands::Preferences(PreferencesCommand::Show) => preferences::show(manager).await,
        Commands::Preferences(PreferencesCommand::Set { key, value }) => {
            preferences::set(manager, &key, &value).await
        }
        Commands::Config(command) => config::execute(&command, config_path),
    }
}
