//! Daily aggregation of tier-classified interval readings.
//!
//! This module turns classified readings into per-reading tier-tagged
//! points, buckets them by civil day in a configured timezone, drops
//! incomplete days, and sums the rest into one row per day.

pub mod aggregate;
pub mod types;

pub use aggregate::{AggregateConfig, aggregate_daily};
pub use types::{DailyRow, TierAmount, TierMap, TieredPoint, WH_PER_KWH};
