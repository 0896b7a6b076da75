//! Output formatting and persistence for daily aggregates.
//!
//! Supports pretty-printing, JSON serialization to a writer, and CSV
//! export of the record-oriented representation.

use anyhow::Result;
use tracing::debug;

use crate::green_data::GreenData;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;

/// Logs the aggregate table using Rust's debug pretty-print format.
pub fn print_pretty(data: &GreenData) {
    debug!("{:#?}", data);
}

/// Writes the aggregate as pretty-printed JSON records.
pub fn write_json<W: Write>(mut writer: W, data: &GreenData) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &data.to_records())?;
    writeln!(writer)?;
    Ok(())
}

/// Writes the aggregate as a CSV file, one row per day, headers first.
///
/// An existing file at `path` is replaced; a daily-aggregate export is a
/// snapshot, so appending would duplicate day rows.
pub fn write_csv(path: &str, data: &GreenData) -> Result<()> {
    debug!(path, rows = data.len(), "Writing CSV export");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    for record in data.to_records() {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TouTier;
    use crate::daily::types::{DailyRow, TierAmount, TierMap};
    use chrono::NaiveDate;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_data() -> GreenData {
        let mut tiers = TierMap::default();
        tiers[TouTier::OnPeak] = TierAmount {
            energy: 1.5,
            cost: 0.15,
        };
        GreenData::new(vec![DailyRow {
            day: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            tiers,
        }])
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_data());
    }

    #[test]
    fn test_write_json_emits_records() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample_data()).unwrap();

        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("2024-01-15"));
        assert!(json.contains("onPeak"));
    }

    #[test]
    fn test_write_csv_creates_file_with_header() {
        let path = temp_path("green_button_daily_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        write_csv(&path, &sample_data()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("onPeak"));
        assert!(lines[0].contains("totalCost"));
        assert!(lines[1].contains("2024-01-15"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_replaces_previous_export() {
        let path = temp_path("green_button_daily_test_replace.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &sample_data()).unwrap();
        write_csv(&path, &sample_data()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // header appears exactly once: the export is a snapshot
        let header_count = content.lines().filter(|l| l.contains("onPeak")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 2);

        fs::remove_file(&path).unwrap();
    }
}
