use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Wire timestamps: RFC3339 with a `T` separator and an offset (`Z` or
/// `+hh:mm`).
pub mod timestamp {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, de::Error};

    /// Parses a wire timestamp. Space separated forms are rejected.
    pub fn parse(value: &str) -> Option<DateTime<FixedOffset>> {
        if !matches!(value.as_bytes().get(10), Some(b'T' | b't')) {
            return None;
        }
        DateTime::parse_from_rfc3339(value).ok()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid RFC3339 timestamp '{value}'")))
    }
}

pub mod entry {
    use super::*;

    /// Classification of an entry.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EntryKind {
        Income,
        Expense,
    }

    /// Request body for `POST /api/items` and `PUT /api/items/{id}`.
    ///
    /// An `id` sent by the client is ignored: the store assigns it on create and
    /// the path wins on update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryNew {
        pub kind: EntryKind,
        /// Decimal amount, must be > 0. Rounded to the cent.
        pub amount: f64,
        /// RFC3339 timestamp, including timezone offset.
        #[serde(deserialize_with = "crate::timestamp::deserialize")]
        pub occurred_at: DateTime<FixedOffset>,
        pub category: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: i64,
        pub kind: EntryKind,
        pub amount: f64,
        /// RFC3339 timestamp in UTC.
        pub occurred_at: DateTime<FixedOffset>,
        pub category: String,
    }
}

pub mod analytics {
    use super::*;

    /// Query string of `GET /api/analytics`.
    ///
    /// Both bounds are kept as raw strings so the server can report which one
    /// is missing or malformed.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AnalyticsWindow {
        pub from: Option<String>,
        pub to: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AnalyticsSummary {
        pub sum: f64,
        pub average: f64,
        pub count: u64,
        pub median: f64,
        pub percentile90: f64,
    }
}
