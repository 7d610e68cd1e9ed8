//! Sensor reading data model.
//!
//! Represents a single detection event pulled from the sensor store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Classified sensor status. Anything that is not the configured full
/// indicator collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorStatus {
    Full,
    Other,
}

impl SensorStatus {
    /// Map the raw status string from storage to a typed status.
    pub fn from_raw(raw: &str, full_indicator: &str) -> Self {
        if raw == full_indicator {
            SensorStatus::Full
        } else {
            SensorStatus::Other
        }
    }

    pub fn is_full(self) -> bool {
        matches!(self, SensorStatus::Full)
    }
}

/// One detection event. Timestamps are naive on purpose: bucketing uses
/// the wall clock the sensor reported, with no time-zone conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: NaiveDateTime,
    pub status: SensorStatus,
}
