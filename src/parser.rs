//! Decoder for Green Button feed documents.

use anyhow::{Context, Result};
use tracing::warn;

use crate::feed::{GreenButtonFeed, IntervalReading};

/// Decodes a JSON-encoded [`GreenButtonFeed`] from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid feed document.
pub fn parse_feed(bytes: &[u8]) -> Result<GreenButtonFeed> {
    serde_json::from_slice(bytes).context("failed to decode Green Button feed document")
}

/// Flattens the first meter reading of the first usage point into one
/// sequence of interval readings.
///
/// Feeds carrying more than one usage point or meter reading are not
/// merged; only the first of each is consumed and the rest are logged and
/// ignored. This matches the upstream export shape we receive, where a
/// document covers a single meter.
///
/// # Errors
///
/// Returns an error if the feed has no usage point or the first usage
/// point has no meter reading.
pub fn extract_readings(feed: &GreenButtonFeed) -> Result<Vec<IntervalReading>> {
    let usage_point = feed
        .usage_points
        .first()
        .context("feed contains no usage points")?;
    if feed.usage_points.len() > 1 {
        warn!(
            usage_points = feed.usage_points.len(),
            "Feed has multiple usage points, using only the first"
        );
    }

    let meter_reading = usage_point
        .meter_readings
        .first()
        .context("usage point contains no meter readings")?;
    if usage_point.meter_readings.len() > 1 {
        warn!(
            meter_readings = usage_point.meter_readings.len(),
            "Usage point has multiple meter readings, using only the first"
        );
    }

    let readings = meter_reading
        .interval_blocks
        .iter()
        .flat_map(|block| block.interval_readings.iter().cloned())
        .collect();

    Ok(readings)
}
