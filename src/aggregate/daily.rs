use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::db::models::SensorReading;

/// The trailing window covers the 7 most recent dates with a full event.
pub const WINDOW_DAYS: usize = 7;

/// Count of full events for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub full_count: u32,
}

/// Ascending, duplicate-free series of at most [`WINDOW_DAYS`] buckets.
/// Dates without a full event do not appear; gaps are not zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedSeries {
    buckets: Vec<DailyBucket>,
}

impl AggregatedSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from pre-ordered buckets. Callers own the ordering
    /// invariant; [`aggregate_weekly`] is the normal constructor.
    pub fn from_buckets(buckets: Vec<DailyBucket>) -> Self {
        debug_assert!(
            buckets.windows(2).all(|pair| pair[0].date < pair[1].date),
            "buckets must be strictly ascending by date"
        );
        debug_assert!(buckets.len() <= WINDOW_DAYS);
        Self { buckets }
    }

    pub fn buckets(&self) -> &[DailyBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyBucket> {
        self.buckets.iter()
    }

    /// Largest count in the series, 0 when empty.
    pub fn max_count(&self) -> u32 {
        self.buckets
            .iter()
            .map(|bucket| bucket.full_count)
            .max()
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a AggregatedSeries {
    type Item = &'a DailyBucket;
    type IntoIter = std::slice::Iter<'a, DailyBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Bucket full events by calendar date and keep the trailing 7-day window.
///
/// Readings may arrive in any order. The date is the timestamp's own wall
/// clock truncated to the day; no time-zone conversion happens here. Empty
/// input yields an empty series, not an error.
pub fn aggregate_weekly(readings: &[SensorReading]) -> AggregatedSeries {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for reading in readings.iter().filter(|reading| reading.status.is_full()) {
        *counts.entry(reading.timestamp.date()).or_insert(0) += 1;
    }

    // BTreeMap iterates ascending; take the most recent dates from the
    // back, then restore ascending order for presentation.
    let mut buckets: Vec<DailyBucket> = counts
        .into_iter()
        .rev()
        .take(WINDOW_DAYS)
        .map(|(date, full_count)| DailyBucket { date, full_count })
        .collect();
    buckets.reverse();

    AggregatedSeries { buckets }
}
