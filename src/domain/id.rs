//! Trade identifier.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Unique, creation-ordered identifier for a trade.
///
/// New ids are UUID v7 strings, so lexical order follows creation time.
/// Ids from older exports (millisecond timestamps) are kept verbatim as
/// strings. The inner String is private to ensure all construction goes
/// through the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TradeId(String);

impl TradeId {
    /// Create a new `TradeId` with a generated time-ordered UUID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Get the trade ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TradeId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TradeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TradeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for TradeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Integer(n) => Self(n.to_string()),
            RawId::Float(f) => Self(format!("{f}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = TradeId::generate();
        let b = TradeId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_ids_sort_by_creation() {
        let first = TradeId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = TradeId::generate();
        assert!(first < second);
    }

    #[test]
    fn deserializes_numeric_legacy_ids() {
        let id: TradeId = serde_json::from_str("1718000000000").unwrap();
        assert_eq!(id.as_str(), "1718000000000");
    }

    #[test]
    fn deserializes_string_ids() {
        let id: TradeId = serde_json::from_str("\"abc-123\"").unwrap();
        assert_eq!(id, TradeId::from("abc-123"));
    }

    #[test]
    fn display_matches_inner() {
        let id = TradeId::from("t-1");
        assert_eq!(id.to_string(), "t-1");
    }
}
