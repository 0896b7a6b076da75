use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::debug;

use crate::classify::TierPartition;
use crate::daily::types::{DailyRow, TierMap, TieredPoint};
use crate::green_data::GreenData;

/// Tunables for daily aggregation.
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Timezone whose civil days the readings are bucketed into. Feed
    /// instants arrive in UTC; "calendar day" only means something in a
    /// local frame.
    pub timezone: Tz,
    /// A day is kept only when it has MORE than this many readings.
    /// Partial days (feed outages, truncated exports) would silently
    /// understate totals, so they are dropped outright. Policy default,
    /// not derived from the expected interval count.
    pub min_readings_per_day: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Vancouver,
            min_readings_per_day: 20,
        }
    }
}

/// Sums classified readings into one row per complete civil day.
///
/// Readings are transformed to tier-tagged points, sorted by timestamp,
/// bucketed by calendar day in `config.timezone`, filtered by the per-day
/// completeness threshold, and summed. Rows come out ordered by day
/// ascending with unique day keys. An input that leaves no complete day
/// yields an empty [`GreenData`].
pub fn aggregate_daily(partition: &TierPartition, config: &AggregateConfig) -> GreenData {
    let mut points: Vec<TieredPoint> = partition
        .iter_tiered()
        .map(|(tier, reading)| TieredPoint::from_reading(tier, reading))
        .collect();
    points.sort_by_key(|p| p.timestamp);

    let keyed: Vec<(NaiveDate, TierMap)> = points
        .iter()
        .map(|p| {
            let day = p.timestamp.with_timezone(&config.timezone).date_naive();
            (day, p.amounts)
        })
        .collect();

    let mut counts: HashMap<NaiveDate, usize> = HashMap::new();
    for (day, _) in &keyed {
        *counts.entry(*day).or_default() += 1;
    }

    let mut days: BTreeMap<NaiveDate, TierMap> = BTreeMap::new();
    let mut dropped = 0usize;
    for (day, amounts) in keyed {
        if counts[&day] <= config.min_readings_per_day {
            dropped += 1;
            continue;
        }
        *days.entry(day).or_default() += amounts;
    }

    if dropped > 0 {
        debug!(
            dropped_readings = dropped,
            threshold = config.min_readings_per_day,
            "Dropped readings on incomplete days"
        );
    }

    let rows: Vec<DailyRow> = days
        .into_iter()
        .map(|(day, tiers)| DailyRow { day, tiers })
        .collect();

    GreenData::new(rows)
}
