//! JSON export and import of the whole collection.
//!
//! Exports are a pretty-printed array of [`TradeRecord`]s. Imports accept
//! the same array, validate every record and give each trade a fresh id;
//! the first bad record rejects the whole file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{Trade, TradeRecord};
use crate::error::{Error, Result};

/// `tradebook-export-YYYY-MM-DD.json`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tradebook-export-{}.json", date.format("%Y-%m-%d"))
}

/// Render trades as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`Error::Json`] if serialization fails.
pub fn export_json(trades: &[Trade]) -> Result<String> {
    let records: Vec<TradeRecord> = trades.iter().map(TradeRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Write an export file named for `date` into `dir` and return its path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn export_to_dir(trades: &[Trade], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    std::fs::write(&path, export_json(trades)?)?;
    info!(count = trades.len(), path = %path.display(), "exported trades");
    Ok(path)
}

/// Parse an export file into new trades.
///
/// # Errors
///
/// Returns [`Error::InvalidImportFormat`] if the text is not a JSON array
/// or any record is invalid. The message names the record's index.
pub fn parse_import(json: &str) -> Result<Vec<Trade>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| Error::InvalidImportFormat(format!("expected a JSON array of trades: {e}")))?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let record: TradeRecord = serde_json::from_value(value)
                .map_err(|e| Error::InvalidImportFormat(format!("record {index}: {e}")))?;
            record
                .into_new_trade()
                .map_err(|e| Error::InvalidImportFormat(format!("record {index}: {e}")))
        })
        .collect()
}

/// Read and parse an export file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise as
/// [`parse_import`].
pub fn import_file(path: &Path) -> Result<Vec<Trade>> {
    let content = std::fs::read_to_string(path)?;
    parse_import(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::TradeBuilder;
    use rust_decimal_macros::dec;

    #[test]
    fn file_name_carries_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        assert_eq!(export_file_name(date), "tradebook-export-2024-09-30.json");
    }

    #[test]
    fn import_assigns_fresh_ids() {
        let trade = TradeBuilder::with_pnl(dec!(25)).symbol("QQQ").build();
        let json = export_json(std::slice::from_ref(&trade)).unwrap();
        let imported = parse_import(&json).unwrap();

        assert_eq!(imported.len(), 1);
        assert_ne!(imported[0].id(), trade.id());
        assert_eq!(imported[0].params(), trade.params());
        assert_eq!(imported[0].profit_loss(), dec!(25));
    }

    #[test]
    fn export_then_import_keeps_fractional_seconds() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 750)
            .unwrap();
        let trade = TradeBuilder::with_pnl(dec!(3)).at(at).build();
        let json = export_json(std::slice::from_ref(&trade)).unwrap();
        assert!(json.contains("\"2024-01-01T10:00:00.750\""));

        let imported = parse_import(&json).unwrap();
        assert_eq!(imported[0].date(), at);
    }

    #[test]
    fn non_array_is_rejected() {
        let err = parse_import(r#"{"symbol":"X"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidImportFormat(_)));
    }

    #[test]
    fn first_bad_record_is_named() {
        let json = r#"[
            {"symbol":"A","entryPrice":1,"exitPrice":2,"quantity":1,"date":"2024-01-01"},
            {"symbol":"B","entryPrice":1,"exitPrice":2,"quantity":0,"date":"2024-01-01"}
        ]"#;
        let err = parse_import(json).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"[{"symbol":"A","entryPrice":1,"quantity":1,"date":"2024-01-01"}]"#;
        let err = parse_import(json).unwrap_err();
        assert!(err.to_string().contains("record 0"));
    }
}
