//! Time-of-use classification of interval readings.
//!
//! Every reading carries a numeric TOU tag assigned by the utility. Tier
//! assignment determines the correctness of every downstream daily sum, so
//! an unrecognized tag aborts the whole extraction rather than dropping
//! the reading.

use thiserror::Error;

use crate::feed::IntervalReading;

/// A pricing tier assigned to a metering interval.
///
/// Maps directly to the feed's numeric `tou` field:
/// - `1` → [`TouTier::OnPeak`]
/// - `2` → [`TouTier::MidPeak`]
/// - `3` → [`TouTier::OffPeak`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouTier {
    OnPeak,
    MidPeak,
    OffPeak,
}

impl TouTier {
    /// All tiers in wire-tag order.
    pub const ALL: [TouTier; 3] = [TouTier::OnPeak, TouTier::MidPeak, TouTier::OffPeak];

    /// Decodes a feed TOU tag.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTierError`] for any tag outside `1..=3`.
    pub fn from_tag(tag: u32) -> Result<Self, InvalidTierError> {
        match tag {
            1 => Ok(TouTier::OnPeak),
            2 => Ok(TouTier::MidPeak),
            3 => Ok(TouTier::OffPeak),
            other => Err(InvalidTierError { tag: other }),
        }
    }

    /// Slot position used by tier-indexed storage.
    pub(crate) fn index(self) -> usize {
        match self {
            TouTier::OnPeak => 0,
            TouTier::MidPeak => 1,
            TouTier::OffPeak => 2,
        }
    }
}

/// A reading's TOU tag was not one of the three recognized tiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid TOU tag {tag}: expected 1 (on-peak), 2 (mid-peak) or 3 (off-peak)")]
pub struct InvalidTierError {
    pub tag: u32,
}

/// Readings partitioned by tier, relative order preserved within each.
#[derive(Debug, Default)]
pub struct TierPartition {
    pub on_peak: Vec<IntervalReading>,
    pub mid_peak: Vec<IntervalReading>,
    pub off_peak: Vec<IntervalReading>,
}

impl TierPartition {
    /// Total reading count across all three tiers.
    pub fn len(&self) -> usize {
        self.on_peak.len() + self.mid_peak.len() + self.off_peak.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tier-tagged view over every reading, on-peak first.
    pub fn iter_tiered(&self) -> impl Iterator<Item = (TouTier, &IntervalReading)> {
        let on = self.on_peak.iter().map(|r| (TouTier::OnPeak, r));
        let mid = self.mid_peak.iter().map(|r| (TouTier::MidPeak, r));
        let off = self.off_peak.iter().map(|r| (TouTier::OffPeak, r));
        on.chain(mid).chain(off)
    }
}

/// Partitions readings into the three TOU tiers.
///
/// Fail-fast validation, not a filter: the first reading with an
/// unrecognized tag invalidates the entire extraction, since silently
/// dropped readings would misstate daily totals.
///
/// # Errors
///
/// Returns [`InvalidTierError`] for the first reading whose tag is
/// outside `1..=3`.
pub fn classify(readings: Vec<IntervalReading>) -> Result<TierPartition, InvalidTierError> {
    let mut partition = TierPartition::default();

    for reading in readings {
        match TouTier::from_tag(reading.tou)? {
            TouTier::OnPeak => partition.on_peak.push(reading),
            TouTier::MidPeak => partition.mid_peak.push(reading),
            TouTier::OffPeak => partition.off_peak.push(reading),
        }
    }

    Ok(partition)
}
