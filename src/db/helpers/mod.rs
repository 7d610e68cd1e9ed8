use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDateTime};

/// Parse a stored timestamp, preserving its wall clock.
///
/// The store writes SQL datetimes (`YYYY-MM-DD HH:MM:SS`); RFC 3339 is
/// accepted as a fallback with the offset dropped, not converted.
pub fn parse_sql_datetime(value: &str, field: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(dt);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .map_err(|err| anyhow!("invalid {field} '{value}': {err}"))
}
