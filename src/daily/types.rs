//! Data types used by the daily aggregation pipeline.

use std::ops::{AddAssign, Index, IndexMut};

use chrono::{DateTime, NaiveDate, Utc};

use crate::classify::TouTier;
use crate::feed::IntervalReading;

/// Source readings are watt-hours; aggregate values are kilowatt-hours.
pub const WH_PER_KWH: f64 = 1000.0;

/// Energy and its cost for a single tier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierAmount {
    pub energy: f64,
    pub cost: f64,
}

impl AddAssign for TierAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.energy += rhs.energy;
        self.cost += rhs.cost;
    }
}

/// Fixed-size map from [`TouTier`] to its [`TierAmount`].
///
/// Collapses what would otherwise be six parallel fields (three energy,
/// three cost) into one tier-indexed structure, so summation is a single
/// per-tier addition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierMap([TierAmount; 3]);

impl TierMap {
    /// A map with only `tier` populated; the other two slots stay zero.
    pub fn one_hot(tier: TouTier, amount: TierAmount) -> Self {
        let mut map = TierMap::default();
        map[tier] = amount;
        map
    }

    /// Sum of the three energy slots.
    pub fn total_energy(&self) -> f64 {
        self.0.iter().map(|a| a.energy).sum()
    }

    /// Sum of the three cost slots.
    pub fn total_cost(&self) -> f64 {
        self.0.iter().map(|a| a.cost).sum()
    }
}

impl Index<TouTier> for TierMap {
    type Output = TierAmount;

    fn index(&self, tier: TouTier) -> &TierAmount {
        &self.0[tier.index()]
    }
}

impl IndexMut<TouTier> for TierMap {
    fn index_mut(&mut self, tier: TouTier) -> &mut TierAmount {
        &mut self.0[tier.index()]
    }
}

impl AddAssign for TierMap {
    fn add_assign(&mut self, rhs: Self) {
        for tier in TouTier::ALL {
            self[tier] += rhs[tier];
        }
    }
}

/// One input reading after the per-reading transform: scaled energy and
/// cost placed in the slot matching its tier, timestamp kept for day
/// bucketing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TieredPoint {
    pub timestamp: DateTime<Utc>,
    pub amounts: TierMap,
}

impl TieredPoint {
    /// Scales the reading to kilowatt-hours and prices it.
    ///
    /// `reading.cost` is a unit price, so cost = scaled energy × price.
    pub fn from_reading(tier: TouTier, reading: &IntervalReading) -> Self {
        let energy = reading.value / WH_PER_KWH;
        let amount = TierAmount {
            energy,
            cost: energy * reading.cost,
        };
        TieredPoint {
            timestamp: reading.time_period.start,
            amounts: TierMap::one_hot(tier, amount),
        }
    }
}

/// Summed usage for one civil day.
///
/// The totals are derived from the tier map on every call rather than
/// stored, so they can never drift from the per-tier fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRow {
    pub day: NaiveDate,
    pub tiers: TierMap,
}

impl DailyRow {
    pub fn total_energy(&self) -> f64 {
        self.tiers.total_energy()
    }

    pub fn total_cost(&self) -> f64 {
        self.tiers.total_cost()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::TimePeriod;
    use chrono::TimeZone;

    #[test]
    fn test_from_reading_is_one_hot() {
        let reading = IntervalReading {
            value: 2000.0,
            cost: 0.2,
            tou: 2,
            time_period: TimePeriod {
                start: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).single().unwrap(),
                duration: 3600,
            },
        };

        let point = TieredPoint::from_reading(TouTier::MidPeak, &reading);

        assert_eq!(point.amounts[TouTier::MidPeak].energy, 2.0);
        assert_eq!(point.amounts[TouTier::MidPeak].cost, 0.4);
        assert_eq!(point.amounts[TouTier::OnPeak], TierAmount::default());
        assert_eq!(point.amounts[TouTier::OffPeak], TierAmount::default());
    }

    #[test]
    fn test_tier_map_add_assign() {
        let mut acc = TierMap::one_hot(
            TouTier::OnPeak,
            TierAmount {
                energy: 1.0,
                cost: 0.1,
            },
        );
        acc += TierMap::one_hot(
            TouTier::OnPeak,
            TierAmount {
                energy: 2.0,
                cost: 0.2,
            },
        );
        acc += TierMap::one_hot(
            TouTier::OffPeak,
            TierAmount {
                energy: 4.0,
                cost: 0.4,
            },
        );

        assert_eq!(acc[TouTier::OnPeak].energy, 3.0);
        assert_eq!(acc[TouTier::OffPeak].energy, 4.0);
        assert_eq!(acc[TouTier::MidPeak].energy, 0.0);
        assert_eq!(acc.total_energy(), 7.0);
    }

    #[test]
    fn test_daily_row_totals_match_tier_sums() {
        let mut tiers = TierMap::default();
        tiers[TouTier::OnPeak] = TierAmount {
            energy: 1.0,
            cost: 0.1,
        };
        tiers[TouTier::MidPeak] = TierAmount {
            energy: 2.0,
            cost: 0.4,
        };
        tiers[TouTier::OffPeak] = TierAmount {
            energy: 3.0,
            cost: 0.9,
        };

        let row = DailyRow {
            day: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            tiers,
        };

        assert_eq!(row.total_energy(), 6.0);
        assert_eq!(row.total_cost(), 1.4);
    }
}
