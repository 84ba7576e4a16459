//! Text parsing for trade fields.
//!
//! Every parse failure becomes [`DomainError::MalformedInput`] naming the
//! field, so malformed input is rejected at the boundary instead of
//! propagating into profit/loss.

use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::error::DomainError;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a decimal field, accepting an optional leading `$` and thousands
/// separators.
///
/// # Errors
/// Returns [`DomainError::MalformedInput`] when the text is not a number.
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, DomainError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(DomainError::malformed(field, raw));
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| DomainError::malformed(field, raw))
}

/// Parse a trade timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` (also with a space separator),
/// a bare `YYYY-MM-DD` (midnight) and RFC 3339 with an offset, which is
/// converted to local time.
///
/// # Errors
/// Returns [`DomainError::MalformedInput`] when no format matches.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DomainError> {
    let text = raw.trim();

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    Err(DomainError::malformed("date", raw))
}

/// Serde adapter for trade timestamps: writes `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// reads anything [`parse_timestamp`] accepts.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Format written for every timestamp. Fractional seconds appear only
    /// when present.
    pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(WIRE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_formatted_decimals() {
        assert_eq!(parse_decimal("entryPrice", "101.25").unwrap(), dec!(101.25));
        assert_eq!(parse_decimal("entryPrice", " $1,250.5 ").unwrap(), dec!(1250.5));
        assert_eq!(parse_decimal("quantity", "1e2").unwrap(), dec!(100));
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = parse_decimal("exitPrice", "NaN").unwrap_err();
        assert_eq!(err, DomainError::malformed("exitPrice", "NaN"));
        assert!(parse_decimal("quantity", "").is_err());
    }

    #[test]
    fn parses_form_style_timestamp_without_seconds() {
        let dt = parse_timestamp("2024-01-15T10:30").unwrap();
        assert_eq!(dt.hour(), 10);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn parses_rfc3339_into_local_time() {
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_ok());
    }

    #[test]
    fn wire_format_keeps_sub_second_precision() {
        let whole = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(whole.format(timestamp::WIRE_FORMAT).to_string(), "2024-01-01T10:00:00");

        let fractional = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(10, 0, 0, 750)
            .unwrap();
        let written = fractional.format(timestamp::WIRE_FORMAT).to_string();
        assert_eq!(written, "2024-01-01T10:00:00.750");
        assert_eq!(parse_timestamp(&written).unwrap(), fractional);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(DomainError::MalformedInput { field: "date", .. })
        ));
    }
}
