//! Output document assembly
//!
//! Builds the single JSON document printed to stdout: evaluation metrics,
//! the future table augmented with predictions, and a top-5-by-revenue
//! summary.


use serde::Serialize;

use crate::data::EventRecord;
use crate::metrics::RegressionMetrics;

/// The complete forecast output document
#[derive(Debug, Serialize)]
pub struct ForecastOutput {
    pub metrics: MetricsBlock,
    pub forecast: Vec<ForecastRecord>,
    pub summary: Summary,
}

/// Evaluation metrics for both targets, null where undefined
#[derive(Debug, Serialize)]
pub struct MetricsBlock {
    pub tickets_r2: Option<f64>,
    pub tickets_mae: Option<f64>,
    pub revenue_r2: Option<f64>,
    pub revenue_mae: Option<f64>,
}

impl MetricsBlock {
    pub fn new(tickets: RegressionMetrics, revenue: RegressionMetrics) -> Self {
        Self {
            tickets_r2: tickets.r2,
            tickets_mae: tickets.mae,
            revenue_r2: revenue.r2,
            revenue_mae: revenue.mae,
        }
    }
}

/// One future event with its predictions appended
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRecord {
    #[serde(flatten)]
    pub event: EventRecord,
    pub pred_sold_tickets: i64,
    pub pred_revenue: f64,
}

/// Aggregate view over all predicted events
#[derive(Debug, Serialize)]
pub struct Summary {
    pub total_events: usize,
    pub sum_pred_tickets: i64,
    pub sum_pred_revenue: f64,
    pub top5_by_revenue: Vec<TopEvent>,
}

/// Display subset of a top-revenue event
#[derive(Debug, Clone, Serialize)]
pub struct TopEvent {
    pub date: String,
    pub city: String,
    pub venue: String,
    pub genre: String,
    pub ticket_price: f64,
    pub marketing_spend: f64,
    pub pred_sold_tickets: i64,
    pub pred_revenue: f64,
}

impl From<&ForecastRecord> for TopEvent {
    fn from(record: &ForecastRecord) -> Self {
        Self {
            date: record.event.date.clone(),
            city: record.event.city.clone(),
            venue: record.event.venue.clone(),
            genre: record.event.genre.clone(),
            ticket_price: record.event.ticket_price,
            marketing_spend: record.event.marketing_spend,
            pred_sold_tickets: record.pred_sold_tickets,
            pred_revenue: record.pred_revenue,
        }
    }
}

/// Ticket predictions are whole, non-negative counts.
pub fn clamp_tickets(raw: f64) -> i64 {
    raw.max(0.0).round() as i64
}

/// Revenue predictions are non-negative, rounded to two decimals.
/// Exact half-cent values round away from zero.
pub fn clamp_revenue(raw: f64) -> f64 {
    (raw.max(0.0) * 100.0).round() / 100.0
}

/// Assemble the output document from future events and raw model outputs.
pub fn build_report(
    metrics: MetricsBlock,
    future: &[EventRecord],
    raw_tickets: &[f64],
    raw_revenue: &[f64],
) -> ForecastOutput {
    let forecast: Vec<ForecastRecord> = future
        .iter()
        .zip(raw_tickets.iter().zip(raw_revenue))
        .map(|(event, (&tickets, &revenue))| ForecastRecord {
            event: event.clone(),
            pred_sold_tickets: clamp_tickets(tickets),
            pred_revenue: clamp_revenue(revenue),
        })
        .collect();

    let summary = Summary {
        total_events: forecast.len(),
        sum_pred_tickets: forecast.iter().map(|r| r.pred_sold_tickets).sum(),
        sum_pred_revenue: forecast.iter().map(|r| r.pred_revenue).sum(),
        top5_by_revenue: top_by_revenue(&forecast, 5),
    };

    ForecastOutput {
        metrics,
        forecast,
        summary,
    }
}

/// Highest predicted revenue first; stable sort keeps original row order on
/// ties.
fn top_by_revenue(forecast: &[ForecastRecord], limit: usize) -> Vec<TopEvent> {
    let mut ranked: Vec<&ForecastRecord> = forecast.iter().collect();
    ranked.sort_by(|a, b| {
        b.pred_revenue
            .partial_cmp(&a.pred_revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.into_iter().take(limit).map(TopEvent::from).collect()
}
