//! The queryable daily-aggregate view.
//!
//! [`GreenData`] wraps the table produced by daily aggregation: one row
//! per civil day, ascending, unique day keys. Views are values — a range
//! query returns a new independent view over a filtered copy, and the
//! parent is never touched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::TouTier;
use crate::daily::types::{DailyRow, TierAmount, TierMap};

/// A range query failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Range start is after range end.
    #[error("range start {start} is after range end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    /// Requested range reaches outside the view's covered span (which is
    /// empty for a view with no rows).
    #[error("requested range {start} to {end} is outside the covered span")]
    OutOfBounds { start: NaiveDate, end: NaiveDate },
}

/// One serialized daily-aggregate record.
///
/// Wire shape of a [`DailyRow`]: the six tier fields under their
/// historical names plus the derived totals, day rendered as an ISO date
/// string. `total`/`totalCost` are included for consumers but recomputed
/// from the tier fields when a record is loaded back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub day: NaiveDate,
    pub on_peak: f64,
    pub mid_peak: f64,
    pub off_peak: f64,
    pub on_cost: f64,
    pub mid_cost: f64,
    pub off_cost: f64,
    pub total: f64,
    pub total_cost: f64,
}

impl From<&DailyRow> for DailyRecord {
    fn from(row: &DailyRow) -> Self {
        DailyRecord {
            day: row.day,
            on_peak: row.tiers[TouTier::OnPeak].energy,
            mid_peak: row.tiers[TouTier::MidPeak].energy,
            off_peak: row.tiers[TouTier::OffPeak].energy,
            on_cost: row.tiers[TouTier::OnPeak].cost,
            mid_cost: row.tiers[TouTier::MidPeak].cost,
            off_cost: row.tiers[TouTier::OffPeak].cost,
            total: row.total_energy(),
            total_cost: row.total_cost(),
        }
    }
}

impl From<DailyRecord> for DailyRow {
    fn from(record: DailyRecord) -> Self {
        let mut tiers = TierMap::default();
        tiers[TouTier::OnPeak] = TierAmount {
            energy: record.on_peak,
            cost: record.on_cost,
        };
        tiers[TouTier::MidPeak] = TierAmount {
            energy: record.mid_peak,
            cost: record.mid_cost,
        };
        tiers[TouTier::OffPeak] = TierAmount {
            energy: record.off_peak,
            cost: record.off_cost,
        };
        DailyRow {
            day: record.day,
            tiers,
        }
    }
}

/// Immutable view over the daily-aggregate table.
#[derive(Debug, Clone, PartialEq)]
pub struct GreenData {
    rows: Vec<DailyRow>,
}

impl GreenData {
    /// Wraps aggregated rows, ordering them by day ascending.
    pub fn new(mut rows: Vec<DailyRow>) -> Self {
        rows.sort_by_key(|r| r.day);
        GreenData { rows }
    }

    pub fn rows(&self) -> &[DailyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First day key of the table, `None` when the table is empty.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.day)
    }

    /// Last day key of the table, `None` when the table is empty.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.day)
    }

    /// Inclusive date-range subset as a new independent view.
    ///
    /// The result's own bounds are recomputed from the surviving rows, not
    /// copied from the request — a requested range may span day keys that
    /// were filtered out as incomplete, so the covered range can come back
    /// narrower than asked for.
    ///
    /// # Errors
    ///
    /// [`RangeError::InvalidRange`] when `start > end`;
    /// [`RangeError::OutOfBounds`] when the request reaches before the
    /// view's first day or past its last day, including every request
    /// against an empty view.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> Result<GreenData, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }

        let (Some(view_start), Some(view_end)) = (self.start_date(), self.end_date()) else {
            return Err(RangeError::OutOfBounds { start, end });
        };
        if start < view_start || end > view_end {
            return Err(RangeError::OutOfBounds { start, end });
        }

        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|r| r.day >= start && r.day <= end)
            .collect();
        Ok(GreenData { rows })
    }

    /// Record-oriented representation, one record per row.
    pub fn to_records(&self) -> Vec<DailyRecord> {
        self.rows.iter().map(DailyRecord::from).collect()
    }

    /// Serializes the table as a JSON array of records.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_records())
    }

    /// Rebuilds a view from serialized records. Derived totals and the
    /// view bounds are recomputed, not trusted from the input.
    pub fn from_records(records: Vec<DailyRecord>) -> Self {
        GreenData::new(records.into_iter().map(DailyRow::from).collect())
    }

    /// Loads a view from the JSON produced by [`GreenData::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(GreenData::from_records(serde_json::from_str(json)?))
    }
}
