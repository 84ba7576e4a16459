//! CLI output formatting.
//!
//! Human-readable output uses colored symbols and indented fields. JSON mode
//! (`--json`) prints one JSON document per command for scripting; quiet mode
//! (`--quiet`) suppresses everything but errors.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// True when human-readable output should be printed.
fn human() -> bool {
    let config = read_config();
    !config.json && !config.quiet
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if !human() {
        return;
    }
    println!("  {:<16} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if !human() {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "warning": message }));
        return;
    }
    eprintln!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "error": message }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a section header.
pub fn section(title: &str) {
    if !human() {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a dimmed note.
pub fn note(message: &str) {
    if !human() {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    if !human() {
        return;
    }
    println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    if !human() {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a serializable value as the command's JSON document.
///
/// Only prints in JSON mode.
pub fn json_output<T: Serialize>(value: &T) {
    if !is_json() {
        return;
    }
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => error(&format!("failed to render JSON: {e}")),
    }
}

/// Format a value in cyan.
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.to_string().cyan())
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    format!("{}", value.to_string().dimmed())
}

/// Signed currency amount, green when positive and red when negative.
pub fn pnl(value: Decimal) -> String {
    let text = money(value);
    if value.is_sign_positive() && !value.is_zero() {
        format!("{}", text.green())
    } else if value.is_sign_negative() && !value.is_zero() {
        format!("{}", text.red())
    } else {
        text
    }
}

/// `$1234.50` / `-$12.00`, two decimals.
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

/// `42.5%`.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_formats_sign_and_cents() {
        assert_eq!(money(dec!(1234.5)), "$1234.50");
        assert_eq!(money(dec!(-12)), "-$12.00");
        assert_eq!(money(dec!(0)), "$0.00");
        assert_eq!(money(dec!(0.004)), "$0.00");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(percent(66.666), "66.7%");
    }
}
