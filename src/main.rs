use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use tradebook::adapter::inbound::cli::command::{Cli, Commands};
use tradebook::adapter::inbound::cli::output::{self, OutputConfig};
use tradebook::adapter::inbound::cli::{config as config_cmd, execute};
use tradebook::adapter::outbound::{FileStoreFactory, JsonPreferenceStore};
use tradebook::application::TradeManager;
use tradebook::config::{paths, Config};
use tradebook::domain::Preferences;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(paths::default_config);

    if let Commands::Config(command) = &cli.command {
        return Ok(config_cmd::execute(command, &config_path)?);
    }

    let config = if cli.config.is_some() {
        Config::load(&config_path)
    } else {
        Config::load_or_default(&config_path)
    }
    .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    config.logging.init();
    debug!(path = %config_path.display(), data_dir = %config.storage.data_dir().display(), "configuration loaded");

    let factory = Arc::new(FileStoreFactory::new(config.storage.clone()));
    let preferences = Arc::new(
        JsonPreferenceStore::new(config.storage.preferences_path()).with_defaults(Preferences {
            backend: config.storage.default_backend,
            ..Preferences::default()
        }),
    );

    let manager = TradeManager::open(factory, preferences, config.storage.timeout())
        .await
        .context("failed to open trade storage")?;
    let count = manager.load().await.context("failed to load trades")?;
    info!(count, backend = %manager.backend().await, "trade collection ready");

    execute(cli.command, &manager, &config, &config_path).await?;
    Ok(())
}
