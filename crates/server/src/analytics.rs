//! Analytics API endpoint

use api_types::{
    analytics::{AnalyticsSummary, AnalyticsWindow},
    timestamp,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::{DateTime, Utc};

use crate::{ServerError, server::ServerState};

/// Parse one bound of the analytics window (RFC3339, offset required).
///
/// A literal `+` in a query string decodes to a space, so clients must send
/// offsets as `Z` or percent-encode them (`%2B02:00`).
fn parse_bound(value: Option<&str>, name: &str) -> Result<DateTime<Utc>, ServerError> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ServerError::Generic(format!("missing {name} date")))?;

    timestamp::parse(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ServerError::Generic(format!("invalid {name} date")))
}

/// Summary statistics over the inclusive window `[from, to]`.
pub async fn get_analytics(
    State(state): State<ServerState>,
    window: Result<Query<AnalyticsWindow>, QueryRejection>,
) -> Result<Json<AnalyticsSummary>, ServerError> {
    let Query(window) = window.map_err(|rejection| ServerError::Generic(rejection.body_text()))?;
    let from = parse_bound(window.from.as_deref(), "from")?;
    let to = parse_bound(window.to.as_deref(), "to")?;

    let summary = state.engine.analytics(from, to).await?;

    Ok(Json(AnalyticsSummary {
        sum: summary.sum,
        average: summary.average,
        count: summary.count,
        median: summary.median,
        percentile90: summary.percentile90,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parse_bound_accepts_rfc3339_with_offset() {
        let parsed = parse_bound(Some("2024-01-01T02:00:00+02:00"), "from").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let parsed = parse_bound(Some("2024-01-31T23:59:59Z"), "to").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn parse_bound_rejects_missing_and_malformed_values() {
        assert!(parse_bound(None, "from").is_err());
        assert!(parse_bound(Some(""), "from").is_err());
        assert!(parse_bound(Some("2024-01-01"), "from").is_err());
        assert!(parse_bound(Some("yesterday"), "to").is_err());
        assert!(parse_bound(Some("2024-01-01 00:00:00Z"), "from").is_err());
        assert!(parse_bound(Some("2024-01-01T00:00:00+0000"), "from").is_err());
    }
}
