//! Tests for feature assembly

use super::*;
use crate::data::{BehavioralAggregates, EventRecord};

fn event(date: &str) -> EventRecord {
    EventRecord {
        date: date.to_string(),
        city: "Sao Paulo".to_string(),
        venue: "Audio Club".to_string(),
        artist: "Ana Costa".to_string(),
        genre: "sertanejo".to_string(),
        ticket_price: 80.0,
        marketing_spend: 5000.0,
        google_trends_genre: 62.0,
        instagram_mentions: 340.0,
        temp_c: 27.5,
        precip_mm: 0.0,
        day_of_week: "Friday".to_string(),
        is_holiday_brazil_hint: 0.0,
        capacity: 1500,
        sold_tickets: Some(1200.0),
        revenue: Some(96000.0),
    }
}

#[test]
fn derives_month_and_weekday() {
    let builder = FeatureBuilder::new();
    // 2024-06-01 was a Saturday
    let rows = builder.build(&[event("2024-06-01")]).unwrap();
    assert_eq!(rows[0].month, 6.0);
    assert_eq!(rows[0].dow_num, 5.0);

    // 2024-01-01 was a Monday, weekday index is zero-based from Monday
    let rows = builder.build(&[event("2024-01-01")]).unwrap();
    assert_eq!(rows[0].month, 1.0);
    assert_eq!(rows[0].dow_num, 0.0);
}

#[test]
fn invalid_date_is_a_hard_error() {
    let builder = FeatureBuilder::new();
    let err = builder.build(&[event("junho 1, 2024")]).unwrap_err();
    assert!(err.to_string().contains("junho 1, 2024"));
}

#[test]
fn numericals_match_declared_schema() {
    let builder = FeatureBuilder::new();
    let rows = builder.build(&[event("2024-06-01")]).unwrap();
    let values = rows[0].numericals();
    assert_eq!(values.len(), NUMERICAL_COLUMNS.len());
    assert_eq!(values[0], 80.0); // ticket_price
    assert_eq!(values[7], 1500.0); // capacity
    assert_eq!(values[8], 6.0); // month
    assert_eq!(values[9], 5.0); // dow_num
}

#[test]
fn categoricals_match_declared_schema() {
    let builder = FeatureBuilder::new();
    let rows = builder.build(&[event("2024-06-01")]).unwrap();
    assert_eq!(
        rows[0].categoricals(),
        ["Sao Paulo", "Audio Club", "sertanejo", "Friday"]
    );
}

#[test]
fn enrichment_broadcasts_onto_every_row() {
    let aggregates = BehavioralAggregates {
        mean_propensity: 0.7,
        mean_monetary_value: 220.0,
        interaction_count: 12.0,
    };
    let builder = FeatureBuilder::with_enrichment(aggregates);
    let rows = builder
        .build(&[event("2024-06-01"), event("2024-06-02"), event("2024-06-03")])
        .unwrap();

    for row in &rows {
        let values = row.numericals();
        assert_eq!(values.len(), NUMERICAL_COLUMNS.len() + ENRICHMENT_COLUMNS.len());
        assert_eq!(values[10], 0.7);
        assert_eq!(values[11], 220.0);
        assert_eq!(values[12], 12.0);
    }
}

#[test]
fn schema_is_stable_across_tables() {
    let aggregates = BehavioralAggregates::default();
    let builder = FeatureBuilder::with_enrichment(aggregates);
    let history = builder.build(&[event("2024-06-01")]).unwrap();
    let future = builder.build(&[event("2024-09-13")]).unwrap();
    assert_eq!(history[0].numericals().len(), future[0].numericals().len());
}
