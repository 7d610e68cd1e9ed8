use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedSeries;

/// Date labels on the chart and in the report use month/day only.
pub const DATE_LABEL_FORMAT: &str = "%m/%d";

const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Structured report data handed to the page renderer. Labels and counts
/// are positionally aligned with the aggregated series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub date_labels: Vec<String>,
    pub counts: Vec<u32>,
    pub generated_at: String,
}

/// Build the payload, stamping it with the current wall clock.
pub fn build_payload(series: &AggregatedSeries) -> ReportPayload {
    build_payload_at(series, Local::now().naive_local())
}

/// Build the payload with an explicit generation timestamp.
pub fn build_payload_at(series: &AggregatedSeries, generated_at: NaiveDateTime) -> ReportPayload {
    ReportPayload {
        date_labels: series
            .iter()
            .map(|bucket| bucket.date.format(DATE_LABEL_FORMAT).to_string())
            .collect(),
        counts: series.iter().map(|bucket| bucket.full_count).collect(),
        generated_at: generated_at.format(GENERATED_AT_FORMAT).to_string(),
    }
}
