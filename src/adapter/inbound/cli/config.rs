//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::command::ConfigCommand;
use crate::adapter::inbound::cli::output;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Default config template with documentation.
pub const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Run a `config` subcommand against the file at `path`.
///
/// These commands do not open any storage, so they work even when the
/// configuration is broken.
///
/// # Errors
///
/// Returns the handler's error.
pub fn execute(command: &ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => execute_init(path, *force),
        ConfigCommand::Show => execute_show(path),
        ConfigCommand::Validate => execute_validate(path),
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "config.init",
            "path": path.display().to_string(),
        }));
        return Ok(());
    }
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::hint(&format!(
        "check it with {}",
        output::highlight(format!("tradebook config validate -c {}", path.display()))
    ));
    Ok(())
}

/// Execute `config show`: the effective configuration with defaults filled
/// in. A missing file shows the defaults.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }
    output::field("Data dir", config.storage.data_dir().display());
    output::lines(&config.to_toml()?);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }
    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Config file is valid");
    Ok(())
}
