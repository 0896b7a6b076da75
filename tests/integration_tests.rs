use chrono::NaiveDate;
use green_button_daily::classify::{TouTier, classify};
use green_button_daily::daily::{AggregateConfig, aggregate_daily};
use green_button_daily::green_data::GreenData;
use green_button_daily::parser::{extract_readings, parse_feed};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn test_full_pipeline() {
    // Two complete hourly days plus a five-reading partial day
    let bytes = include_bytes!("fixtures/sample_feed.json");
    let feed = parse_feed(bytes).expect("Failed to parse feed");
    let readings = extract_readings(&feed).expect("Failed to extract readings");
    assert_eq!(readings.len(), 53);

    let partition = classify(readings).expect("Failed to classify");
    assert_eq!(partition.len(), 53);

    let data = aggregate_daily(&partition, &AggregateConfig::default());

    // the partial day is dropped by the completeness filter
    assert_eq!(data.len(), 2);
    assert_eq!(data.start_date(), Some(day(15)));
    assert_eq!(data.end_date(), Some(day(16)));

    let first = &data.rows()[0];
    assert!((first.tiers[TouTier::OnPeak].energy - 5.61).abs() < 1e-9);
    assert!((first.tiers[TouTier::MidPeak].energy - 5.49).abs() < 1e-9);
    assert!((first.tiers[TouTier::OffPeak].energy - 10.86).abs() < 1e-9);
    assert!((first.total_energy() - 21.96).abs() < 1e-9);

    let expected_cost = 5.61 * 0.14 + 5.49 * 0.10 + 10.86 * 0.07;
    assert!((first.total_cost() - expected_cost).abs() < 1e-9);
}

#[test]
fn test_range_query_and_round_trip() {
    let bytes = include_bytes!("fixtures/sample_feed.json");
    let feed = parse_feed(bytes).unwrap();
    let partition = classify(extract_readings(&feed).unwrap()).unwrap();
    let data = aggregate_daily(&partition, &AggregateConfig::default());

    let subset = data.range(day(16), day(16)).unwrap();
    assert_eq!(subset.len(), 1);
    assert_eq!(subset.start_date(), Some(day(16)));

    // parent is untouched by the range query
    assert_eq!(data.len(), 2);
    assert_eq!(data.start_date(), Some(day(15)));

    // serialized records reload to an equivalent view
    let json = data.to_json().unwrap();
    let reloaded = GreenData::from_json(&json).unwrap();
    assert_eq!(reloaded, data);

    // the partial day was filtered out, so requesting it is out of bounds
    assert!(data.range(day(15), day(17)).is_err());
}
