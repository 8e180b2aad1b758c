//! End-to-end forecast pipeline
//!
//! Loader output in, report document out: build features, split, fit the two
//! regressors, evaluate on the held-out rows, predict the future table.

use tracing::info;

use crate::data::{BehavioralAggregates, EventRecord};
use crate::error::Result;
use crate::features::FeatureBuilder;
use crate::metrics::evaluate;
use crate::model::{train_mask, FittedModel};
use crate::report::{build_report, ForecastOutput, MetricsBlock};

/// Run the whole pipeline over loaded tables.
///
/// `enrichment` applies to both tables or neither; the feature schema fed to
/// `fit` and `predict` is identical by construction.
pub fn run(
    history: &[EventRecord],
    future: &[EventRecord],
    enrichment: Option<BehavioralAggregates>,
) -> Result<ForecastOutput> {
    let builder = match enrichment {
        Some(aggregates) => FeatureBuilder::with_enrichment(aggregates),
        None => FeatureBuilder::new(),
    };
    let features = builder.build(history)?;
    let future_features = builder.build(future)?;

    // Missing outcomes on a history row count as zero
    let y_tickets: Vec<f64> = history.iter().map(|e| e.sold_tickets.unwrap_or(0.0)).collect();
    let y_revenue: Vec<f64> = history.iter().map(|e| e.revenue.unwrap_or(0.0)).collect();

    let mask = train_mask(features.len());
    let (train_rows, test_rows) = partition(&features, &mask);
    let (tickets_train, tickets_test) = partition(&y_tickets, &mask);
    let (revenue_train, revenue_test) = partition(&y_revenue, &mask);

    info!(
        train = train_rows.len(),
        held_out = test_rows.len(),
        future = future.len(),
        "fitting tickets and revenue models"
    );

    let tickets_model = FittedModel::fit(&train_rows, &tickets_train)?;
    let revenue_model = FittedModel::fit(&train_rows, &revenue_train)?;

    let tickets_metrics = evaluate(&tickets_test, &tickets_model.predict(&test_rows));
    let revenue_metrics = evaluate(&revenue_test, &revenue_model.predict(&test_rows));

    let raw_tickets = tickets_model.predict(&future_features);
    let raw_revenue = revenue_model.predict(&future_features);

    let output = build_report(
        MetricsBlock::new(tickets_metrics, revenue_metrics),
        future,
        &raw_tickets,
        &raw_revenue,
    );
    info!(
        events = output.summary.total_events,
        tickets = output.summary.sum_pred_tickets,
        "forecast complete"
    );
    Ok(output)
}

fn partition<T: Clone>(items: &[T], mask: &[bool]) -> (Vec<T>, Vec<T>) {
    let mut train = Vec::new();
    let mut test = Vec::new();
    for (item, &in_train) in items.iter().zip(mask) {
        if in_train {
            train.push(item.clone());
        } else {
            test.push(item.clone());
        }
    }
    (train, test)
}
