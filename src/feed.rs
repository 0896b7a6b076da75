//! Typed object graph for a decoded Green Button feed.
//!
//! The upstream feed parser hands us `usagePoint → meterReading →
//! intervalBlock → intervalReading`, carried as a JSON document. These
//! structs mirror that graph; timestamps arrive as epoch seconds per ESPI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A decoded Green Button feed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenButtonFeed {
    pub usage_points: Vec<UsagePoint>,
}

/// One metered service point (a physical meter location).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePoint {
    pub meter_readings: Vec<MeterReading>,
}

/// One reading series for a usage point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterReading {
    pub interval_blocks: Vec<IntervalBlock>,
}

/// A contiguous block of interval readings (typically one export chunk).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalBlock {
    pub interval_readings: Vec<IntervalReading>,
}

/// One metered energy value over a short time window.
///
/// `value` is in source units (watt-hours); `cost` is the unit price the
/// utility attached to this interval, not a pre-multiplied amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalReading {
    pub value: f64,
    pub cost: f64,
    /// TOU tier tag assigned by the utility: 1 = on-peak, 2 = mid-peak,
    /// 3 = off-peak. Anything else is rejected at classification time.
    pub tou: u32,
    pub time_period: TimePeriod,
}

/// The window an interval reading covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimePeriod {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start: DateTime<Utc>,
    /// Window length in seconds.
    pub duration: u64,
}
