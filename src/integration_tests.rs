//! End-to-end pipeline tests over synthetic event tables

use crate::data::{BehavioralAggregates, EventRecord};
use crate::pipeline;

fn history_event(i: usize) -> EventRecord {
    let city = if i % 2 == 0 { "Sao Paulo" } else { "Recife" };
    let genre = if i % 3 == 0 { "funk" } else { "sertanejo" };
    let capacity = 1000 + (i as i64 % 5) * 400;
    let sold = (capacity as f64) * 0.7 + (i as f64) * 10.0;
    EventRecord {
        date: format!("2025-01-{:02}", i % 28 + 1),
        city: city.to_string(),
        venue: format!("{city} Hall"),
        artist: format!("Artist {i}"),
        genre: genre.to_string(),
        ticket_price: 60.0 + (i as f64 % 4.0) * 10.0,
        marketing_spend: 3000.0 + (i as f64) * 100.0,
        google_trends_genre: 50.0 + (i as f64 % 30.0),
        instagram_mentions: 200.0 + (i as f64) * 5.0,
        temp_c: 25.0 + (i as f64 % 8.0),
        precip_mm: (i as f64 % 3.0) * 1.5,
        day_of_week: "Friday".to_string(),
        is_holiday_brazil_hint: if i % 7 == 0 { 1.0 } else { 0.0 },
        capacity,
        sold_tickets: Some(sold),
        revenue: Some(sold * 70.0),
    }
}

fn future_event(city: &str, date: &str) -> EventRecord {
    EventRecord {
        date: date.to_string(),
        city: city.to_string(),
        venue: format!("{city} Hall"),
        artist: "Headliner".to_string(),
        genre: "sertanejo".to_string(),
        ticket_price: 85.0,
        marketing_spend: 7000.0,
        google_trends_genre: 64.0,
        instagram_mentions: 410.0,
        temp_c: 26.0,
        precip_mm: 0.0,
        day_of_week: "Saturday".to_string(),
        is_holiday_brazil_hint: 0.0,
        capacity: 1800,
        sold_tickets: None,
        revenue: None,
    }
}

fn history(n: usize) -> Vec<EventRecord> {
    (0..n).map(history_event).collect()
}

#[test]
fn forecasts_three_future_events() {
    let history = history(20);
    let future = vec![
        future_event("Sao Paulo", "2025-09-12"),
        future_event("Recife", "2025-09-13"),
        future_event("Sao Paulo", "2025-09-14"),
    ];

    let output = pipeline::run(&history, &future, None).unwrap();

    assert_eq!(output.forecast.len(), 3);
    assert_eq!(output.summary.total_events, 3);
    assert_eq!(output.summary.top5_by_revenue.len(), 3);
    assert!(output.forecast.iter().all(|r| r.pred_sold_tickets >= 0));
    assert!(output.forecast.iter().all(|r| r.pred_revenue >= 0.0));

    let expected: i64 = output.forecast.iter().map(|r| r.pred_sold_tickets).sum();
    assert_eq!(output.summary.sum_pred_tickets, expected);
}

#[test]
fn runs_are_byte_identical() {
    let history = history(20);
    let future = vec![
        future_event("Sao Paulo", "2025-09-12"),
        future_event("Recife", "2025-09-13"),
    ];

    let first = pipeline::run(&history, &future, None).unwrap();
    let second = pipeline::run(&history, &future, None).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn single_history_row_reports_null_metrics() {
    let history = history(1);
    let future = vec![future_event("Sao Paulo", "2025-09-12")];

    let output = pipeline::run(&history, &future, None).unwrap();
    assert!(output.metrics.tickets_r2.is_none());
    assert!(output.metrics.tickets_mae.is_none());
    assert!(output.metrics.revenue_r2.is_none());
    assert!(output.metrics.revenue_mae.is_none());
    assert_eq!(output.forecast.len(), 1);
}

#[test]
fn unseen_city_still_gets_a_prediction() {
    let history = history(20);
    let future = vec![future_event("Manaus", "2025-09-12")];

    let output = pipeline::run(&history, &future, None).unwrap();
    assert_eq!(output.forecast.len(), 1);
    assert!(output.forecast[0].pred_sold_tickets >= 0);
}

#[test]
fn enrichment_flows_through_the_pipeline() {
    let history = history(20);
    let future = vec![future_event("Recife", "2025-09-13")];
    let aggregates = BehavioralAggregates {
        mean_propensity: 0.65,
        mean_monetary_value: 180.0,
        interaction_count: 950.0,
    };

    let output = pipeline::run(&history, &future, Some(aggregates)).unwrap();
    assert_eq!(output.forecast.len(), 1);
    assert!(output.forecast[0].pred_revenue >= 0.0);
}

#[test]
fn invalid_history_date_fails_the_run() {
    let mut history = history(5);
    history[2].date = "13/09/2025".to_string();
    let future = vec![future_event("Recife", "2025-09-13")];

    let err = pipeline::run(&history, &future, None).unwrap_err();
    assert!(err.to_string().contains("13/09/2025"));
}
