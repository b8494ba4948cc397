use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of the `YYYY-MM-DD` prefix of a timestamp.
const DAY_LEN: usize = 10;

/// Naive date-time layouts accepted besides RFC 3339.
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// A single signed money movement on a wallet.
///
/// `category` holds the category *name*, not its id. Renaming a category
/// leaves existing transactions with the old label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: String,

    /// Owning wallet
    pub wallet_id: String,

    /// Category name
    pub category: String,

    /// Positive = inflow, negative = outflow
    pub value: f64,

    /// Optional free-text memo. Never blank when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO-8601 date or date-time; starts with `YYYY-MM-DD`
    pub timestamp: String,
}

impl Transaction {
    /// The `YYYY-MM-DD` day this transaction belongs to.
    pub fn day(&self) -> &str {
        day_of(&self.timestamp)
    }

    /// The timestamp as an instant, or `None` when it can't be parsed.
    /// Naive values are read as UTC.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Payload for `upsert_transaction`. Without an `id`, a new transaction is created.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionInput {
    pub id: Option<String>,
    pub wallet_id: String,
    pub category: String,
    pub value: f64,
    pub description: Option<String>,
    pub timestamp: String,
}

impl TransactionInput {
    pub fn new(
        wallet_id: impl Into<String>,
        category: impl Into<String>,
        value: f64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            wallet_id: wallet_id.into(),
            category: category.into(),
            value,
            description: None,
            timestamp: timestamp.into(),
        }
    }

    /// Target an existing transaction.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// First ten characters of a timestamp (the whole string if shorter).
pub fn day_of(timestamp: &str) -> &str {
    match timestamp.char_indices().nth(DAY_LEN) {
        Some((idx, _)) => &timestamp[..idx],
        None => timestamp,
    }
}

/// Parse an ISO-8601 date or date-time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_truncates_date_time() {
        assert_eq!(day_of("2025-01-15T08:30"), "2025-01-15");
    }

    #[test]
    fn day_of_keeps_short_input() {
        assert_eq!(day_of("2025-01"), "2025-01");
        assert_eq!(day_of(""), "");
    }

    #[test]
    fn day_of_is_char_safe() {
        assert_eq!(day_of("ąąąąąąąąąąąą"), "ąąąąąąąąąą");
    }

    #[test]
    fn parses_supported_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(parse_timestamp("2025-01-15"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-15T00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-15T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-15T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-01-15T01:00:00+01:00"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
