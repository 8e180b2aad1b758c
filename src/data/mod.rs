//! Event data loading
//!
//! Two sourcing modes:
//! - File mode: two CSV files (history, future), see [`csv_loader`]
//! - Remote mode: Supabase event store, split by outcome null-ness, see [`remote`]
//!
//! Both modes fail fast with a descriptive error when a required column is
//! missing; the feature matrix is only as good as its schema.

pub mod csv_loader;
pub mod remote;


use serde::{Deserialize, Serialize};

/// One event occurrence, historical or upcoming.
///
/// `sold_tickets` and `revenue` are present on historical events and absent
/// (null) on events pending prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: String,
    pub city: String,
    pub venue: String,
    pub artist: String,
    pub genre: String,
    pub ticket_price: f64,
    pub marketing_spend: f64,
    pub google_trends_genre: f64,
    pub instagram_mentions: f64,
    pub temp_c: f64,
    pub precip_mm: f64,
    pub day_of_week: String,
    pub is_holiday_brazil_hint: f64,
    pub capacity: i64,
    #[serde(default)]
    pub sold_tickets: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
}

impl EventRecord {
    /// An event is historical once both outcomes are known.
    pub fn has_outcomes(&self) -> bool {
        self.sold_tickets.is_some() && self.revenue.is_some()
    }
}

/// Columns every event source must provide.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "date",
    "city",
    "venue",
    "artist",
    "genre",
    "ticket_price",
    "marketing_spend",
    "google_trends_genre",
    "instagram_mentions",
    "temp_c",
    "precip_mm",
    "day_of_week",
    "is_holiday_brazil_hint",
    "capacity",
    "sold_tickets",
    "revenue",
];

/// Outcome columns, optional on future tables.
pub const OUTCOME_COLUMNS: [&str; 2] = ["sold_tickets", "revenue"];

/// Scalar aggregates over the behavioral tables, broadcast identically onto
/// every event row when enrichment is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BehavioralAggregates {
    pub mean_propensity: f64,
    pub mean_monetary_value: f64,
    pub interaction_count: f64,
}

impl Default for BehavioralAggregates {
    /// Fallback values for empty auxiliary tables.
    fn default() -> Self {
        Self {
            mean_propensity: 0.5,
            mean_monetary_value: 100.0,
            interaction_count: 0.0,
        }
    }
}

impl BehavioralAggregates {
    /// Aggregate scoring snapshots and the interaction count into broadcast
    /// scalars. Defaults apply per field when the backing data is empty.
    pub fn compute(snapshots: &[remote::ScoringSnapshot], interaction_count: usize) -> Self {
        let defaults = Self::default();

        let mean_propensity = if snapshots.is_empty() {
            defaults.mean_propensity
        } else {
            snapshots.iter().map(|s| s.propensity_score).sum::<f64>() / snapshots.len() as f64
        };

        let monetary: Vec<f64> = snapshots.iter().filter_map(|s| s.monetary_value).collect();
        let mean_monetary_value = if monetary.is_empty() {
            defaults.mean_monetary_value
        } else {
            monetary.iter().sum::<f64>() / monetary.len() as f64
        };

        Self {
            mean_propensity,
            mean_monetary_value,
            interaction_count: interaction_count as f64,
        }
    }
}

/// Partition events into (history, future) by outcome null-ness.
///
/// Events missing either outcome go to the future set and are never used for
/// fitting. Relative order within each partition is preserved.
pub fn split_by_outcomes(events: Vec<EventRecord>) -> (Vec<EventRecord>, Vec<EventRecord>) {
    events.into_iter().partition(EventRecord::has_outcomes)
}
